use anyhow::Context;
use clap::Parser;

use noteserver::cli::Cli;
use noteserver::config::AppConfig;
use noteserver::database::DatabaseManager;
use noteserver::state::AppState;
use noteserver::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.apply(AppConfig::from_env());
    config.validate()?;

    telemetry::init(&config.logging).context("failed to open log file")?;
    tracing::info!("Starting note server in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::ensure_schema(&pool).await?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::with_pool(config, pool)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, noteserver::app(state)).await?;
    Ok(())
}
