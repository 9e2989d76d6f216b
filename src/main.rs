//! bolao-gateway server entry point.
//!
//! Starts the Axum HTTP server over the PostgreSQL-backed settlement
//! core.

use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bolao_gateway::api;
use bolao_gateway::app_state::AppState;
use bolao_gateway::config::GatewayConfig;
use bolao_gateway::domain::PlatformFee;
use bolao_gateway::persistence::postgres::{
    PgEventRepository, PgUserRepository, PgWagerRepository,
};
use bolao_gateway::service::SettlementService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    let fee = PlatformFee::new(config.fee_fraction)?;
    tracing::info!(addr = %config.listen_addr, fee = %fee.formatted_percent(), "starting bolao-gateway");

    // Connect to PostgreSQL
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database_connect_timeout_secs,
        ))
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    // Build service layer
    let settlement = Arc::new(SettlementService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgEventRepository::new(pool.clone())),
        Arc::new(PgWagerRepository::new(pool)),
        fee,
    ));

    // Build application state
    let app_state = AppState { settlement };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
