//! CodeQuiz - Application Entry Point

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codequiz::{
    config::{Config, LogFormat},
    db,
    judge::JudgeClient,
    state::AppState,
};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    tracing::info!("Starting CodeQuiz server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize judge client
    let judge = JudgeClient::from_config(&config)?;
    tracing::info!(
        judge_url = %config.judge.base_url,
        fallback_enabled = config.fallback.enabled,
        fallback_on_unreachable = config.fallback.on_unreachable,
        grading_policy = ?config.evaluation.grading_policy,
        "Judge client ready"
    );
    if let Err(cause) = judge.health().await {
        tracing::warn!(cause = %cause, "Judge is not reachable at startup");
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state and router
    let state = AppState::new(db_pool, judge, config);
    let app = codequiz::app(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
