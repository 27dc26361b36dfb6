use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf}
};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    database::db_structs::{RatedGame, Season, TeamId},
    model::{constants::ModelParameters, rating_tracker::RatingTracker}
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Game {game_id} has a non-finite rating")]
    NonFiniteGameRating { game_id: i32 },

    #[error("Team {team_id} has a non-finite rating in season {season}")]
    NonFiniteRating { team_id: TeamId, season: Season }
}

#[derive(Serialize)]
struct HistoryFile<'a> {
    model_name: &'a str,
    parameters: &'a ModelParameters,
    seasons: &'a [Season],
    /// team -> season -> ratings
    ratings: IndexMap<TeamId, IndexMap<Season, Vec<f64>>>
}

pub fn history_path(dir: &Path, model_name: &str) -> PathBuf {
    dir.join(format!("{}_elo_history.json", model_name))
}

pub fn games_path(dir: &Path, model_name: &str) -> PathBuf {
    dir.join(format!("{}_games.json", model_name))
}

/// Writes the rating history and the annotated games as JSON files named after the
/// model, creating `dir` if needed. Returns the written paths.
///
/// JSON has no NaN or infinity, so results holding a non-finite rating are rejected
/// before anything is written.
pub fn write_results(
    dir: &Path,
    model_name: &str,
    parameters: &ModelParameters,
    rated_games: &[RatedGame],
    rating_tracker: &RatingTracker
) -> Result<Vec<PathBuf>, ExportError> {
    check_finite(rated_games, rating_tracker)?;
    fs::create_dir_all(dir)?;

    let history = HistoryFile {
        model_name,
        parameters,
        seasons: rating_tracker.seasons(),
        ratings: rating_tracker.rating_history()
    };

    let history_path = history_path(dir, model_name);
    serde_json::to_writer_pretty(BufWriter::new(File::create(&history_path)?), &history)?;

    let games_path = games_path(dir, model_name);
    serde_json::to_writer_pretty(BufWriter::new(File::create(&games_path)?), rated_games)?;

    info!(
        history = %history_path.display(),
        games = %games_path.display(),
        "Exported results"
    );

    Ok(vec![history_path, games_path])
}

fn check_finite(rated_games: &[RatedGame], rating_tracker: &RatingTracker) -> Result<(), ExportError> {
    if let Some(rated) = rated_games.iter().find(|rated| {
        ![
            rated.away_rating_pre,
            rated.away_rating_post,
            rated.home_rating_pre,
            rated.home_rating_post
        ]
        .iter()
        .all(|rating| rating.is_finite())
    }) {
        return Err(ExportError::NonFiniteGameRating { game_id: rated.game.id });
    }

    if let Some((_, adjustment)) = rating_tracker
        .adjustment_history()
        .into_iter()
        .find(|(_, adjustment)| !adjustment.rating_before.is_finite() || !adjustment.rating_after.is_finite())
    {
        return Err(ExportError::NonFiniteRating {
            team_id: adjustment.team_id,
            season: adjustment.season
        });
    }

    Ok(())
}
