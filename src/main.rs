use clap::Parser;
use elo_processor::{
    args::Args,
    database::db::DbClient,
    export,
    model::{
        constants::ModelParameters,
        elo_model::EloModel,
        rating_utils::{initial_ratings, team_ids}
    }
};
use std::{fmt::Display, process};
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    let connection_string = match &args.connection_string {
        Some(connection_string) => connection_string.clone(),
        None => {
            error!("CONNECTION_STRING environment variable must be set");
            process::exit(1);
        }
    };

    let mut client = match DbClient::connect(&connection_string).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            error!("Application cannot start without a valid database connection");
            process::exit(1);
        }
    };

    // Fetch teams, season order and games for processing
    let teams = client.get_teams().await.unwrap_or_else(|e| fail("Failed to fetch teams", e));
    let seasons = client
        .get_seasons()
        .await
        .unwrap_or_else(|e| fail("Failed to fetch seasons", e));
    let games = client.get_games().await.unwrap_or_else(|e| fail("Failed to fetch games", e));

    // 1. Seed initial ratings
    let parameters = ModelParameters::with_home_advantage(args.home_advantage);
    let mut model = EloModel::new(
        &args.model_name,
        parameters,
        &team_ids(&teams),
        &initial_ratings(&teams),
        &seasons
    )
    .unwrap_or_else(|e| fail("Invalid model configuration", e));

    // 2. Rate every game in order
    let rated_games = model
        .process(&games)
        .unwrap_or_else(|e| fail("Failed to process games", e));

    // 3. Persist
    if args.dry_run {
        info!("Dry run, skipping database writes");
    } else {
        client
            .save_results(&model.name, &rated_games, &model.rating_tracker)
            .await
            .unwrap_or_else(|e| fail("Failed to save results", e));
    }

    if let Some(dir) = &args.output_dir {
        export::write_results(dir, &model.name, &model.parameters, &rated_games, &model.rating_tracker)
            .unwrap_or_else(|e| fail("Failed to export results", e));
    }

    info!(model = %model.name, games = rated_games.len(), "Processing complete");
}

fn init_logging(log_level: &str) {
    let indicatif_layer = IndicatifLayer::new();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn fail<T>(context: &str, e: impl Display) -> T {
    error!("{}: {}", context, e);
    process::exit(1)
}
