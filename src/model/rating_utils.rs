use std::collections::HashMap;

use tracing::warn;

use crate::database::db_structs::{Team, TeamId};

/// Maps each team to its supplied initial rating.
///
/// Teams without an initial rating are left out (and logged) rather than given a
/// default; initializing the model with such a team reports it as a configuration error.
pub fn initial_ratings(teams: &[Team]) -> HashMap<TeamId, f64> {
    let mut ratings = HashMap::with_capacity(teams.len());

    for team in teams {
        match team.initial_rating {
            Some(rating) => {
                ratings.insert(team.id, rating);
            }
            None => warn!(team_id = team.id, name = %team.name, "Team has no initial rating")
        }
    }

    ratings
}

pub fn team_ids(teams: &[Team]) -> Vec<TeamId> {
    teams.iter().map(|team| team.id).collect()
}
