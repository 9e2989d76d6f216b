//! Wager handlers: placement, estimation, and listing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    EstimateParams, EstimateResponse, PlaceWagerRequest, WagerDto, WagerListResponse,
};
use crate::app_state::AppState;
use crate::domain::money::RawAmount;
use crate::error::{CoreError, ErrorResponse};

/// `POST /wagers` — Place a wager on the active event.
///
/// # Errors
///
/// Returns [`CoreError`] per the placement chain: unknown user (404),
/// superadmin bettor (403), closed wagering (409), unknown outcome or
/// bad amount (400).
#[utoipa::path(
    post,
    path = "/api/v1/wagers",
    tag = "Wagers",
    summary = "Place a wager",
    description = "Places a stake on one outcome of the active event. The amount may be a JSON number or a numeric string; comma decimal separators are accepted.",
    request_body = PlaceWagerRequest,
    responses(
        (status = 201, description = "Wager placed"),
        (status = 400, description = "Invalid outcome or amount", body = ErrorResponse),
        (status = 403, description = "User may not wager", body = ErrorResponse),
        (status = 404, description = "User or active event not found", body = ErrorResponse),
        (status = 409, description = "Wagering is closed", body = ErrorResponse),
    )
)]
pub async fn place_wager(
    State(state): State<AppState>,
    Json(req): Json<PlaceWagerRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let wager = state
        .settlement
        .place_wager(req.user_id, &req.outcome, req.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(WagerDto::from(wager))))
}

/// `GET /wagers/estimate` — Estimate the return of a hypothetical stake.
///
/// # Errors
///
/// Returns [`CoreError`] on a missing active event or unknown outcome.
#[utoipa::path(
    get,
    path = "/api/v1/wagers/estimate",
    tag = "Wagers",
    summary = "Estimate a return",
    description = "Simulates adding the given stake to an outcome of the active event and returns the proportional share of the enlarged net pool.",
    responses(
        (status = 200, description = "Estimated return"),
        (status = 400, description = "Unknown outcome or bad amount", body = ErrorResponse),
        (status = 404, description = "No active event", body = ErrorResponse),
    )
)]
pub async fn estimate_return(
    State(state): State<AppState>,
    Query(params): Query<EstimateParams>,
) -> Result<impl IntoResponse, CoreError> {
    let estimated = state
        .settlement
        .estimate_return(&params.outcome, RawAmount::Number(params.amount))
        .await?;
    Ok(Json(EstimateResponse {
        outcome: params.outcome,
        amount: params.amount,
        estimated_return: estimated,
    }))
}

/// `GET /users/:id/wagers` — One user's wager history, newest first.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/wagers",
    tag = "Wagers",
    summary = "List a user's wagers",
    params(
        ("id" = uuid::Uuid, Path, description = "User UUID"),
    ),
    responses(
        (status = 200, description = "Wager history"),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn list_user_wagers(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, CoreError> {
    let wagers = state.settlement.list_wagers_for_user(id).await?;
    Ok(Json(WagerListResponse::from_wagers(wagers)))
}

/// Wager routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wagers", post(place_wager))
        .route("/wagers/estimate", get(estimate_return))
        .route("/users/{id}/wagers", get(list_user_wagers))
}
