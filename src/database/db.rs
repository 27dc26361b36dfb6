use super::db_structs::{Game, RatedGame, Season, Team};
use crate::{model::rating_tracker::RatingTracker, utils::progress_utils::progress_bar};
use itertools::Itertools;
use postgres_types::ToSql;
use tokio_postgres::{Client, Error, NoTls, Row, Transaction};
use tracing::{error, info};

// Keeps each multi-row insert well below the 65535 bind parameter limit
const INSERT_CHUNK_SIZE: usize = 1000;

pub struct DbClient {
    client: Client
}

/// One `rating_adjustments` row, with the adjustment type already converted for binding
struct AdjustmentRow {
    team_id: i32,
    season: i32,
    sequence: i32,
    game_id: Option<i32>,
    adjustment_type: i32,
    rating_before: f64,
    rating_after: f64
}

impl DbClient {
    // Connect to the database and return a DbClient instance
    pub async fn connect(connection_str: &str) -> Result<Self, Error> {
        let (client, connection) = tokio_postgres::connect(connection_str, NoTls).await?;

        // Spawn the connection object to run in the background
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {}", e);
            }
        });

        Ok(DbClient { client })
    }

    /// Fetches every team ordered by id. Teams without an initial rating are included
    /// so that the model can report them.
    pub async fn get_teams(&self) -> Result<Vec<Team>, Error> {
        info!("Fetching teams...");
        let rows = self
            .client
            .query("SELECT id, name, initial_rating FROM teams ORDER BY id", &[])
            .await?;

        let teams = rows.iter().map(Self::team_from_row).collect_vec();

        info!("Fetched {} teams", teams.len());
        Ok(teams)
    }

    /// Fetches season labels in chronological order
    pub async fn get_seasons(&self) -> Result<Vec<Season>, Error> {
        let rows = self
            .client
            .query("SELECT season FROM seasons ORDER BY sort_order, season", &[])
            .await?;

        Ok(rows.iter().map(|row| row.get::<_, i32>("season")).collect())
    }

    /// Fetches every game in the order it was played
    pub async fn get_games(&self) -> Result<Vec<Game>, Error> {
        info!("Fetching games...");
        let rows = self
            .client
            .query(
                "SELECT id, season, start_time, away_team_id, home_team_id, away_score, home_score \
                FROM games ORDER BY start_time, id",
                &[]
            )
            .await?;

        let games = rows.iter().map(Self::game_from_row).collect_vec();

        info!("Fetched {} games", games.len());
        Ok(games)
    }

    fn team_from_row(row: &Row) -> Team {
        Team {
            id: row.get("id"),
            name: row.get("name"),
            initial_rating: row.get("initial_rating")
        }
    }

    fn game_from_row(row: &Row) -> Game {
        Game {
            id: row.get("id"),
            season: row.get("season"),
            start_time: row.get("start_time"),
            away_team_id: row.get("away_team_id"),
            home_team_id: row.get("home_team_id"),
            away_score: row.get("away_score"),
            home_score: row.get("home_score")
        }
    }

    /// Replaces everything stored for `model_name` with the results of this run.
    ///
    /// Runs in a single transaction: a failure leaves the previous results in place.
    /// Results stored under other model names are never touched.
    pub async fn save_results(
        &mut self,
        model_name: &str,
        rated_games: &[RatedGame],
        rating_tracker: &RatingTracker
    ) -> Result<(), Error> {
        let transaction = self.client.transaction().await?;

        let removed_games = transaction
            .execute("DELETE FROM game_ratings WHERE model_name = $1", &[&model_name])
            .await?;
        let removed_adjustments = transaction
            .execute("DELETE FROM rating_adjustments WHERE model_name = $1", &[&model_name])
            .await?;

        info!(
            model = model_name,
            removed_games, removed_adjustments, "Cleared previous results"
        );

        Self::save_game_ratings(&transaction, model_name, rated_games).await?;
        Self::save_rating_adjustments(&transaction, model_name, rating_tracker).await?;

        transaction.commit().await?;

        info!(model = model_name, "Results saved");
        Ok(())
    }

    async fn save_game_ratings(
        transaction: &Transaction<'_>,
        model_name: &str,
        rated_games: &[RatedGame]
    ) -> Result<(), Error> {
        let p_bar = progress_bar(rated_games.len() as u64, "Saving game ratings".to_string());

        for chunk in rated_games.chunks(INSERT_CHUNK_SIZE) {
            let mut placeholders = Vec::with_capacity(chunk.len());
            let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(1 + chunk.len() * 5);
            params.push(&model_name);

            for (i, rated) in chunk.iter().enumerate() {
                let base = 2 + i * 5;
                placeholders.push(format!(
                    "($1, ${}, ${}, ${}, ${}, ${})",
                    base,
                    base + 1,
                    base + 2,
                    base + 3,
                    base + 4
                ));

                params.push(&rated.game.id);
                params.push(&rated.away_rating_pre);
                params.push(&rated.away_rating_post);
                params.push(&rated.home_rating_pre);
                params.push(&rated.home_rating_post);
            }

            let query = format!(
                "INSERT INTO game_ratings (model_name, game_id, away_rating_pre, away_rating_post, \
                home_rating_pre, home_rating_post) VALUES {}",
                placeholders.join(", ")
            );
            transaction.execute(query.as_str(), &params).await?;

            if let Some(bar) = &p_bar {
                bar.inc(chunk.len() as u64);
            }
        }

        if let Some(bar) = p_bar {
            bar.finish();
        }

        info!("Saved {} game ratings", rated_games.len());
        Ok(())
    }

    async fn save_rating_adjustments(
        transaction: &Transaction<'_>,
        model_name: &str,
        rating_tracker: &RatingTracker
    ) -> Result<(), Error> {
        let rows = rating_tracker
            .adjustment_history()
            .into_iter()
            .map(|(sequence, adjustment)| AdjustmentRow {
                team_id: adjustment.team_id,
                season: adjustment.season,
                sequence: sequence as i32,
                game_id: adjustment.game_id,
                adjustment_type: adjustment.adjustment_type.into(),
                rating_before: adjustment.rating_before,
                rating_after: adjustment.rating_after
            })
            .collect_vec();

        let p_bar = progress_bar(rows.len() as u64, "Saving rating adjustments".to_string());

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut placeholders = Vec::with_capacity(chunk.len());
            let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(1 + chunk.len() * 7);
            params.push(&model_name);

            for (i, row) in chunk.iter().enumerate() {
                let base = 2 + i * 7;
                placeholders.push(format!(
                    "($1, {})",
                    (base..base + 7).map(|p| format!("${}", p)).join(", ")
                ));

                params.push(&row.team_id);
                params.push(&row.season);
                params.push(&row.sequence);
                params.push(&row.game_id);
                params.push(&row.adjustment_type);
                params.push(&row.rating_before);
                params.push(&row.rating_after);
            }

            let query = format!(
                "INSERT INTO rating_adjustments (model_name, team_id, season, sequence, game_id, \
                adjustment_type, rating_before, rating_after) VALUES {}",
                placeholders.join(", ")
            );
            transaction.execute(query.as_str(), &params).await?;

            if let Some(bar) = &p_bar {
                bar.inc(chunk.len() as u64);
            }
        }

        if let Some(bar) = p_bar {
            bar.finish();
        }

        info!("Saved {} rating adjustments", rows.len());
        Ok(())
    }
}
