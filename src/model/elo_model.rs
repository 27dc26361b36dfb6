use std::collections::HashMap;

use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    database::db_structs::{Game, RatedGame, RatingAdjustment, Season, TeamId},
    model::{
        constants::ModelParameters,
        elo,
        error::ModelError,
        rating_tracker::RatingTracker,
        season::seed_season,
        structures::rating_adjustment_type::RatingAdjustmentType
    },
    utils::progress_utils::progress_bar
};

pub struct EloModel {
    /// Opaque label, only used to name persisted results
    pub name: String,
    pub parameters: ModelParameters,
    pub rating_tracker: RatingTracker
}

impl EloModel {
    /// Creates the model and seeds every team's first season with its initial rating.
    ///
    /// Every team needs an entry in `initial_ratings`; `seasons` is the chronological
    /// season order every later season lookup is resolved against.
    pub fn new(
        name: &str,
        parameters: ModelParameters,
        team_ids: &[TeamId],
        initial_ratings: &HashMap<TeamId, f64>,
        seasons: &[Season]
    ) -> Result<EloModel, ModelError> {
        let mut tracker = RatingTracker::new(seasons)?;
        let first_season = tracker.first_season();

        for team_id in team_ids.iter().unique() {
            let rating = *initial_ratings
                .get(team_id)
                .ok_or(ModelError::MissingInitialRating { team_id: *team_id })?;

            tracker.track_team(*team_id);
            tracker.seed(RatingAdjustment {
                team_id: *team_id,
                season: first_season,
                game_id: None,
                rating_before: rating,
                rating_after: rating,
                adjustment_type: RatingAdjustmentType::Initial
            })?;
        }

        info!(
            model = name,
            teams = team_ids.len(),
            seasons = seasons.len(),
            "Initialized model"
        );

        Ok(EloModel {
            name: name.to_string(),
            parameters,
            rating_tracker: tracker
        })
    }

    /// Rates every game in the order given, returning the games annotated with
    /// each side's pre-game and post-game rating.
    ///
    /// Games must already be in chronological order. Processing stops at the first
    /// game that cannot be rated; games before it stay recorded in the tracker.
    pub fn process(&mut self, games: &[Game]) -> Result<Vec<RatedGame>, ModelError> {
        let progress_bar = progress_bar(games.len() as u64, "Processing games".to_string());
        let mut rated_games = Vec::with_capacity(games.len());

        for game in games {
            rated_games.push(self.process_game(game)?);

            if let Some(bar) = &progress_bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress_bar {
            bar.finish();
        }

        info!(model = %self.name, games = rated_games.len(), "Processed games");
        Ok(rated_games)
    }

    /// # Game processing
    ///
    /// 1. Seed the season for either team appearing in it for the first time. The
    ///     opening rating is regressed from the team's last rating of the previous season.
    ///     Both teams are checked first, so a rejected game leaves the tracker unchanged.
    /// 2. Read each team's current rating and rate the game.
    /// 3. Record the post-game ratings in the tracker and on the returned game.
    fn process_game(&mut self, game: &Game) -> Result<RatedGame, ModelError> {
        if game.away_team_id == game.home_team_id {
            return Err(ModelError::SelfMatch {
                game_id: game.id,
                team_id: game.home_team_id
            });
        }

        for team_id in [game.away_team_id, game.home_team_id] {
            if !self.rating_tracker.is_tracked(team_id) {
                return Err(ModelError::UnknownTeam { team_id });
            }
        }

        // Neither side is seeded unless both can be
        for team_id in [game.away_team_id, game.home_team_id] {
            if !self.rating_tracker.is_seeded(team_id, game.season)? {
                self.rating_tracker.previous_season_last(team_id, game.season)?;
            }
        }

        let away_rating_pre = seed_season(
            &mut self.rating_tracker,
            &self.parameters,
            game.away_team_id,
            game.season
        )?;
        let home_rating_pre = seed_season(
            &mut self.rating_tracker,
            &self.parameters,
            game.home_team_id,
            game.season
        )?;

        let (away_rating_post, home_rating_post) = elo::update(
            &self.parameters,
            away_rating_pre,
            game.away_score,
            home_rating_pre,
            game.home_score
        );

        debug!(
            game_id = game.id,
            away_rating_pre, away_rating_post, home_rating_pre, home_rating_post, "Rated game"
        );

        self.rating_tracker.append(RatingAdjustment {
            team_id: game.away_team_id,
            season: game.season,
            game_id: Some(game.id),
            rating_before: away_rating_pre,
            rating_after: away_rating_post,
            adjustment_type: RatingAdjustmentType::Game
        })?;
        self.rating_tracker.append(RatingAdjustment {
            team_id: game.home_team_id,
            season: game.season,
            game_id: Some(game.id),
            rating_before: home_rating_pre,
            rating_after: home_rating_post,
            adjustment_type: RatingAdjustmentType::Game
        })?;

        Ok(RatedGame {
            game: game.clone(),
            away_rating_pre,
            away_rating_post,
            home_rating_pre,
            home_rating_post
        })
    }
}
