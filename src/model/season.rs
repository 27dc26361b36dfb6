use tracing::debug;

use crate::{
    database::db_structs::{RatingAdjustment, Season, TeamId},
    model::{
        constants::ModelParameters, error::ModelError, rating_tracker::RatingTracker,
        structures::rating_adjustment_type::RatingAdjustmentType::SeasonRegression
    }
};

/// Pulls a rating toward the league mean for the start of a new season
pub fn season_adjustment(params: &ModelParameters, prior_rating: f64) -> f64 {
    params.season_carryover * prior_rating + params.season_regression_weight() * params.season_mean_rating
}

/// Seeds the team's season on its first appearance, returning the rating the team
/// enters its next game with.
///
/// A season that already has ratings is left untouched. Otherwise the team's last
/// rating from the preceding season is regressed with [`season_adjustment`] and
/// recorded as the season's opening rating. A team that sat out the preceding season
/// has nothing to carry over and is rejected.
pub fn seed_season(
    rating_tracker: &mut RatingTracker,
    params: &ModelParameters,
    team_id: TeamId,
    season: Season
) -> Result<f64, ModelError> {
    if rating_tracker.is_seeded(team_id, season)? {
        return rating_tracker.current(team_id, season);
    }

    let prior_rating = rating_tracker.previous_season_last(team_id, season)?;
    let opening_rating = season_adjustment(params, prior_rating);

    debug!(
        team_id,
        season, prior_rating, opening_rating, "Regressed rating for new season"
    );

    rating_tracker.seed(RatingAdjustment {
        team_id,
        season,
        game_id: None,
        rating_before: prior_rating,
        rating_after: opening_rating,
        adjustment_type: SeasonRegression
    })?;

    Ok(opening_rating)
}
