use crate::{
    database::db_structs::{Game, RatingAdjustment, Season, Team, TeamId},
    model::structures::rating_adjustment_type::RatingAdjustmentType
};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

pub fn generate_team(id: TeamId, initial_rating: Option<f64>) -> Team {
    Team {
        id,
        name: format!("Team {}", id),
        initial_rating
    }
}

pub fn generate_initial_ratings(team_ids: &[TeamId], rating: f64) -> HashMap<TeamId, f64> {
    team_ids.iter().map(|id| (*id, rating)).collect()
}

pub fn generate_adjustment(
    team_id: TeamId,
    season: Season,
    rating_before: f64,
    rating_after: f64,
    adjustment_type: RatingAdjustmentType
) -> RatingAdjustment {
    RatingAdjustment {
        team_id,
        season,
        game_id: None,
        rating_before,
        rating_after,
        adjustment_type
    }
}

pub fn generate_game(
    id: i32,
    season: Season,
    away_team_id: TeamId,
    home_team_id: TeamId,
    away_score: i32,
    home_score: i32
) -> Game {
    Game {
        id,
        season,
        start_time: game_time(id),
        away_team_id,
        home_team_id,
        away_score,
        home_score
    }
}

/// Generates a chronologically ordered schedule.
///
/// The first round of every season is a cycle through all teams so each team plays in
/// each season; the remaining rounds pair teams at random. Scores are random but
/// reproducible for a given seed.
pub fn generate_schedule(team_ids: &[TeamId], seasons: &[Season], rounds_per_season: usize, seed: u64) -> Vec<Game> {
    if team_ids.len() < 2 {
        panic!("A schedule needs at least 2 teams");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut games = Vec::new();
    let mut id = 1;

    for season in seasons {
        for round in 0..rounds_per_season {
            let pairs: Vec<(TeamId, TeamId)> = if round == 0 {
                (0..team_ids.len())
                    .map(|i| (team_ids[i], team_ids[(i + 1) % team_ids.len()]))
                    .filter(|(away, home)| away != home)
                    .collect()
            } else {
                let mut shuffled = team_ids.to_vec();
                shuffled.shuffle(&mut rng);
                shuffled.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
            };

            for (away, home) in pairs {
                let away_score = rng.random_range(60..=120);
                let home_score = rng.random_range(60..=120);

                games.push(generate_game(id, *season, away, home, away_score, home_score));
                id += 1;
            }
        }
    }

    games
}

fn game_time(id: i32) -> DateTime<FixedOffset> {
    let start = Utc.with_ymd_and_hms(2013, 11, 1, 19, 0, 0).unwrap().fixed_offset();

    start + Duration::hours(id as i64)
}
