//! System endpoints: health check and fee policy info.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Fee policy info.
#[derive(Debug, Serialize, ToSchema)]
struct FeeInfoResponse {
    fraction: f64,
    percent: String,
    minimum_stake: f64,
}

/// `GET /config/fee` — The platform fee and minimum stake in effect.
#[utoipa::path(
    get,
    path = "/config/fee",
    tag = "System",
    summary = "Fee policy",
    description = "Returns the platform fee fraction fixed at startup and the minimum accepted stake.",
    responses(
        (status = 200, description = "Fee policy", body = FeeInfoResponse),
    )
)]
pub async fn fee_info_handler(State(state): State<AppState>) -> impl IntoResponse {
    let fee = state.settlement.fee();
    (
        StatusCode::OK,
        Json(FeeInfoResponse {
            fraction: fee.fraction(),
            percent: fee.formatted_percent(),
            minimum_stake: crate::domain::money::MIN_STAKE,
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/fee", get(fee_info_handler))
}
