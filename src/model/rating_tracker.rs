use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    database::db_structs::{RatingAdjustment, Season, TeamId},
    model::error::ModelError
};

/// Owns every team's per-season rating history.
///
/// Each history entry is a [`RatingAdjustment`]; the rating sequence of a (team, season)
/// pair is the `rating_after` of its adjustments, in order. The first adjustment of a
/// season is its seed, every later one is a game.
pub struct RatingTracker {
    // Explicit chronological order; "previous season" is always resolved against this.
    seasons: Vec<Season>,
    // Team -> season -> adjustments. Teams keep initialization order, seasons keep `seasons` order.
    histories: IndexMap<TeamId, IndexMap<Season, Vec<RatingAdjustment>>>
}

impl RatingTracker {
    pub fn new(seasons: &[Season]) -> Result<RatingTracker, ModelError> {
        if seasons.is_empty() {
            return Err(ModelError::NoSeasons);
        }

        if let Some(season) = seasons.iter().duplicates().next() {
            return Err(ModelError::DuplicateSeason { season: *season });
        }

        Ok(RatingTracker {
            seasons: seasons.to_vec(),
            histories: IndexMap::new()
        })
    }

    /// Creates an empty history for every season. Tracking a team twice is a no-op.
    pub fn track_team(&mut self, team_id: TeamId) {
        let seasons = &self.seasons;
        self.histories
            .entry(team_id)
            .or_insert_with(|| seasons.iter().map(|season| (*season, Vec::new())).collect());
    }

    /// Records the opening rating of a season. The season must still be empty.
    pub fn seed(&mut self, adjustment: RatingAdjustment) -> Result<(), ModelError> {
        let (team_id, season) = (adjustment.team_id, adjustment.season);
        let history = self.history_mut(team_id, season)?;

        if !history.is_empty() {
            return Err(ModelError::AlreadySeeded { team_id, season });
        }

        history.push(adjustment);
        Ok(())
    }

    /// Records a post-game rating. The season must already be seeded.
    pub fn append(&mut self, adjustment: RatingAdjustment) -> Result<(), ModelError> {
        let (team_id, season) = (adjustment.team_id, adjustment.season);
        let history = self.history_mut(team_id, season)?;

        if history.is_empty() {
            return Err(ModelError::NotSeeded { team_id, season });
        }

        history.push(adjustment);
        Ok(())
    }

    /// The most recent rating of the team in the season
    pub fn current(&self, team_id: TeamId, season: Season) -> Result<f64, ModelError> {
        self.history(team_id, season)?
            .last()
            .map(|adjustment| adjustment.rating_after)
            .ok_or(ModelError::NotSeeded { team_id, season })
    }

    /// The team's last rating in the season preceding `season` in the season order
    pub fn previous_season_last(&self, team_id: TeamId, season: Season) -> Result<f64, ModelError> {
        let index = self.season_index(season)?;
        if index == 0 {
            return Err(ModelError::NoPreviousSeason { team_id, season });
        }

        let previous_season = self.seasons[index - 1];
        self.history(team_id, previous_season)?
            .last()
            .map(|adjustment| adjustment.rating_after)
            .ok_or(ModelError::MissingPreviousSeason {
                team_id,
                season,
                previous_season
            })
    }

    pub fn is_seeded(&self, team_id: TeamId, season: Season) -> Result<bool, ModelError> {
        Ok(!self.history(team_id, season)?.is_empty())
    }

    pub fn is_tracked(&self, team_id: TeamId) -> bool {
        self.histories.contains_key(&team_id)
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn first_season(&self) -> Season {
        // `new` rejects an empty season order
        self.seasons[0]
    }

    pub fn team_ids(&self) -> impl Iterator<Item = &TeamId> {
        self.histories.keys()
    }

    pub fn adjustments(&self, team_id: TeamId, season: Season) -> Option<&[RatingAdjustment]> {
        self.histories
            .get(&team_id)
            .and_then(|seasons| seasons.get(&season))
            .map(|history| history.as_slice())
    }

    /// The plain rating sequence of a (team, season) pair
    pub fn ratings(&self, team_id: TeamId, season: Season) -> Option<Vec<f64>> {
        self.adjustments(team_id, season)
            .map(|history| history.iter().map(|adjustment| adjustment.rating_after).collect())
    }

    /// Team -> season -> ratings, for every tracked team and every season
    pub fn rating_history(&self) -> IndexMap<TeamId, IndexMap<Season, Vec<f64>>> {
        self.histories
            .iter()
            .map(|(team_id, seasons)| {
                let ratings: IndexMap<Season, Vec<f64>> = seasons
                    .iter()
                    .map(|(season, history)| {
                        (*season, history.iter().map(|adjustment| adjustment.rating_after).collect())
                    })
                    .collect();

                (*team_id, ratings)
            })
            .collect()
    }

    /// Every adjustment paired with its position inside its (team, season) history
    pub fn adjustment_history(&self) -> Vec<(usize, &RatingAdjustment)> {
        self.histories
            .values()
            .flat_map(|seasons| seasons.values())
            .flat_map(|history| history.iter().enumerate())
            .collect()
    }

    fn season_index(&self, season: Season) -> Result<usize, ModelError> {
        self.seasons
            .iter()
            .position(|s| *s == season)
            .ok_or(ModelError::UnknownSeason { season })
    }

    fn history(&self, team_id: TeamId, season: Season) -> Result<&Vec<RatingAdjustment>, ModelError> {
        self.histories
            .get(&team_id)
            .ok_or(ModelError::UnknownTeam { team_id })?
            .get(&season)
            .ok_or(ModelError::UnknownSeason { season })
    }

    fn history_mut(&mut self, team_id: TeamId, season: Season) -> Result<&mut Vec<RatingAdjustment>, ModelError> {
        self.histories
            .get_mut(&team_id)
            .ok_or(ModelError::UnknownTeam { team_id })?
            .get_mut(&season)
            .ok_or(ModelError::UnknownSeason { season })
    }
}
