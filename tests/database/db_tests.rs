use elo_processor::{
    database::{db::DbClient, db_structs::RatedGame},
    model::{
        constants::ModelParameters,
        elo_model::EloModel,
        rating_utils::{initial_ratings, team_ids}
    }
};
use serial_test::serial;
use std::process::Command;

use super::test_helpers::TestDatabase;
use crate::common::init_test_env;

const GAME_RATINGS_COUNT: &str = "SELECT COUNT(*) FROM game_ratings WHERE model_name = $1";
const ADJUSTMENTS_COUNT: &str = "SELECT COUNT(*) FROM rating_adjustments WHERE model_name = $1";

async fn run_model(client: &DbClient, model_name: &str) -> (EloModel, Vec<RatedGame>) {
    let teams = client.get_teams().await.expect("Failed to get teams");
    let seasons = client.get_seasons().await.expect("Failed to get seasons");
    let games = client.get_games().await.expect("Failed to get games");

    let mut model = EloModel::new(
        model_name,
        ModelParameters::default(),
        &team_ids(&teams),
        &initial_ratings(&teams),
        &seasons
    )
    .expect("Failed to create model");
    let rated_games = model.process(&games).expect("Failed to process games");

    (model, rated_games)
}

#[tokio::test]
#[serial]
async fn test_get_teams() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    let teams = client.get_teams().await.expect("Failed to get teams");

    assert_eq!(teams.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(teams[0].name, "Boston");
    assert_eq!(teams[2].initial_rating, Some(1450.0));
    assert_eq!(teams[3].initial_rating, None);
}

#[tokio::test]
#[serial]
async fn test_get_seasons_uses_sort_order() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    let seasons = client.get_seasons().await.expect("Failed to get seasons");

    assert_eq!(seasons, vec![1314, 1415]);
}

#[tokio::test]
#[serial]
async fn test_get_games_in_chronological_order() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    let games = client.get_games().await.expect("Failed to get games");

    assert_eq!(games.iter().map(|g| g.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(games[0].away_team_id, 1);
    assert_eq!(games[0].home_team_id, 2);
    assert_eq!(games[0].away_score, 100);
    assert_eq!(games[0].home_score, 110);
    assert_eq!(games[3].season, 1415);

    for pair in games.windows(2) {
        assert!(pair[0].start_time <= pair[1].start_time);
    }
}

#[tokio::test]
#[serial]
async fn test_empty_database() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");

    let client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    assert!(client.get_teams().await.expect("Failed to get teams").is_empty());
    assert!(client.get_seasons().await.expect("Failed to get seasons").is_empty());
    assert!(client.get_games().await.expect("Failed to get games").is_empty());
}

#[tokio::test]
#[serial]
async fn test_save_results() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db
        .seed_processable_data()
        .await
        .expect("Failed to seed test data");

    let mut client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    let (model, rated_games) = run_model(&client, "elo").await;

    client
        .save_results(&model.name, &rated_games, &model.rating_tracker)
        .await
        .expect("Failed to save results");

    assert_eq!(test_db.count(GAME_RATINGS_COUNT, "elo").await.unwrap(), 6);
    // 4 initial ratings, 3 season regressions (team 4 never plays) and 2 entries per game
    assert_eq!(test_db.count(ADJUSTMENTS_COUNT, "elo").await.unwrap(), 4 + 3 + 12);

    let check_client = test_db.get_client().await.expect("Failed to get client");
    let types: Vec<i32> = check_client
        .query(
            "SELECT adjustment_type FROM rating_adjustments \
            WHERE model_name = 'elo' AND team_id = 1 AND season = 1415 ORDER BY sequence",
            &[]
        )
        .await
        .expect("Failed to query")
        .iter()
        .map(|row| row.get(0))
        .collect();
    assert_eq!(types, vec![1, 2, 2]);

    let row = check_client
        .query_one(
            "SELECT home_rating_pre, home_rating_post FROM game_ratings \
            WHERE model_name = 'elo' AND game_id = 1",
            &[]
        )
        .await
        .expect("Failed to query");
    let home_rating_pre: f64 = row.get(0);
    let home_rating_post: f64 = row.get(1);
    assert_eq!(home_rating_pre, 1500.0);
    assert!(home_rating_post > home_rating_pre);
}

#[tokio::test]
#[serial]
async fn test_processor_run_persists_results() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db
        .seed_processable_data()
        .await
        .expect("Failed to seed test data");

    let output = Command::new(env!("CARGO_BIN_EXE_elo-processor"))
        .env("CONNECTION_STRING", &test_db.connection_string)
        .env("MODEL_NAME", "nba")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute processor");

    assert!(
        output.status.success(),
        "Processor failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(test_db.count(GAME_RATINGS_COUNT, "nba").await.unwrap(), 6);
    assert_eq!(test_db.count(ADJUSTMENTS_COUNT, "nba").await.unwrap(), 19);
}

#[tokio::test]
#[serial]
async fn test_processor_dry_run_writes_nothing() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db
        .seed_processable_data()
        .await
        .expect("Failed to seed test data");

    let output = Command::new(env!("CARGO_BIN_EXE_elo-processor"))
        .arg("--dry-run")
        .env("CONNECTION_STRING", &test_db.connection_string)
        .env("MODEL_NAME", "nba")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute processor");

    assert!(output.status.success());
    assert_eq!(test_db.count(GAME_RATINGS_COUNT, "nba").await.unwrap(), 0);
    assert_eq!(test_db.count(ADJUSTMENTS_COUNT, "nba").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_processor_rejects_team_without_initial_rating() {
    init_test_env();

    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let output = Command::new(env!("CARGO_BIN_EXE_elo-processor"))
        .env("CONNECTION_STRING", &test_db.connection_string)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute processor");

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid model configuration"),
        "Should report the unusable team. Got: {}",
        stderr
    );
}
