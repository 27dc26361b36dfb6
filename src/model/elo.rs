//! Pure ELO formulas. Nothing here touches rating state; callers record the results.

use crate::model::{constants::ModelParameters, structures::game_outcome::GameOutcome};

/// Returns `(p_away, p_home)`, the probability of each side winning.
///
/// `home_rating` is the home side's stored rating; the home advantage is added here,
/// once, before comparing. Both probabilities come from the same logistic curve
/// mirrored around the rating difference, so they always sum to 1.
pub fn win_probability(params: &ModelParameters, away_rating: f64, home_rating: f64) -> (f64, f64) {
    let effective_home = home_rating + params.home_advantage;

    let p_away = 1.0 / (1.0 + 10f64.powf((effective_home - away_rating) / params.logistic_scale));
    let p_home = 1.0 / (1.0 + 10f64.powf((away_rating - effective_home) / params.logistic_scale));

    (p_away, p_home)
}

/// Margin-of-victory weighted K.
///
/// `rating_gap` is the winner's effective rating minus the loser's and is negative
/// for an upset. Neither input is clamped: a negative margin or a gap that drives the
/// denominator to zero produces NaN or infinite K.
pub fn k_factor(params: &ModelParameters, margin_of_victory: f64, rating_gap: f64) -> f64 {
    params.k_multiplier * (margin_of_victory + params.k_mov_offset).powf(params.k_mov_exponent)
        / (params.k_base + params.k_rating_gap_weight * rating_gap)
}

/// Rates a single game, returning `(new_away_rating, new_home_rating)`.
///
/// The home advantage only feeds the probability and K computations. The returned
/// ratings are `K * (actual - expected)` applied to the ratings passed in.
pub fn update(
    params: &ModelParameters,
    away_rating: f64,
    away_score: i32,
    home_rating: f64,
    home_score: i32
) -> (f64, f64) {
    let effective_home = home_rating + params.home_advantage;
    let outcome = GameOutcome::from_scores(away_score, home_score);
    let (s_away, s_home) = outcome.actual_scores();

    let (e_away, e_home) = win_probability(params, away_rating, home_rating);

    let (margin_of_victory, rating_gap) = match outcome {
        GameOutcome::AwayWin => (
            away_score as f64 - home_score as f64,
            away_rating - effective_home
        ),
        GameOutcome::HomeWin => (
            home_score as f64 - away_score as f64,
            effective_home - away_rating
        )
    };

    let k = k_factor(params, margin_of_victory, rating_gap);

    (k * (s_away - e_away) + away_rating, k * (s_home - e_home) + home_rating)
}
