//! Event lifecycle handlers: summary, open/close, resolve, reset.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    EventDto, EventSummaryResponse, ResetRequest, ResetResponse, ResolutionResponse,
    ResolveRequest, ToggleRequest, WagerListResponse,
};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{CoreError, ErrorResponse};

/// `GET /events/active` — The active event with per-outcome totals.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if no event is active.
#[utoipa::path(
    get,
    path = "/api/v1/events/active",
    tag = "Events",
    summary = "Get the active event",
    description = "Returns the single active event together with per-outcome staked totals and the gross/net pool snapshot.",
    responses(
        (status = 200, description = "Active event summary"),
        (status = 404, description = "No active event", body = ErrorResponse),
    )
)]
pub async fn active_event(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CoreError> {
    let summary = state.settlement.active_event_summary().await?;
    Ok(Json(EventSummaryResponse::from(summary)))
}

/// `POST /events/active/close` — Close wagering on the active event.
///
/// # Errors
///
/// Returns [`CoreError::Permission`] unless the user manages events.
#[utoipa::path(
    post,
    path = "/api/v1/events/active/close",
    tag = "Events",
    summary = "Close wagering",
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "Wagering closed"),
        (status = 403, description = "Not an event manager", body = ErrorResponse),
        (status = 404, description = "No active event", body = ErrorResponse),
    )
)]
pub async fn close_wagering(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let event = state.settlement.toggle_wagering(req.user_id, false).await?;
    Ok(Json(EventDto::from(event)))
}

/// `POST /events/active/open` — Reopen wagering on the active event.
///
/// # Errors
///
/// Returns [`CoreError::InvalidState`] if a winner is already set,
/// [`CoreError::Permission`] unless the user manages events.
#[utoipa::path(
    post,
    path = "/api/v1/events/active/open",
    tag = "Events",
    summary = "Reopen wagering",
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "Wagering reopened"),
        (status = 403, description = "Not an event manager", body = ErrorResponse),
        (status = 409, description = "Winner already defined", body = ErrorResponse),
    )
)]
pub async fn open_wagering(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let event = state.settlement.toggle_wagering(req.user_id, true).await?;
    Ok(Json(EventDto::from(event)))
}

/// `POST /events/active/resolve` — Define the winner and settle.
///
/// # Errors
///
/// Returns [`CoreError::InvalidState`] if wagering is still open,
/// [`CoreError::Validation`] on an unknown outcome,
/// [`CoreError::Permission`] unless the user manages events.
#[utoipa::path(
    post,
    path = "/api/v1/events/active/resolve",
    tag = "Events",
    summary = "Resolve the active event",
    description = "Defines the winning outcome, distributes the net prize pool, and records the settlement history atomically.",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Event resolved with settlement"),
        (status = 400, description = "Unknown winning outcome", body = ErrorResponse),
        (status = 403, description = "Not an event manager", body = ErrorResponse),
        (status = 409, description = "Wagering still open", body = ErrorResponse),
    )
)]
pub async fn resolve_event(
    State(state): State<AppState>,
    Json(req): Json<ResolveRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let resolution = state
        .settlement
        .resolve_event(req.user_id, &req.winner)
        .await?;
    Ok(Json(ResolutionResponse::from(resolution)))
}

/// `POST /events/reset` — Archive the active event and start fresh.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] on a bad outcome set,
/// [`CoreError::Permission`] unless the user manages events.
#[utoipa::path(
    post,
    path = "/api/v1/events/reset",
    tag = "Events",
    summary = "Reset the pool",
    description = "Archives the currently active event (preserving its wagers) and creates a new active event with the given outcomes.",
    request_body = ResetRequest,
    responses(
        (status = 201, description = "New event created"),
        (status = 400, description = "Invalid outcome set", body = ErrorResponse),
        (status = 403, description = "Not an event manager", body = ErrorResponse),
    )
)]
pub async fn reset_event(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let reset = state
        .settlement
        .reset_event(req.user_id, req.name, req.outcomes)
        .await?;
    Ok((StatusCode::CREATED, Json(ResetResponse::from(reset))))
}

/// `GET /events/:id/wagers` — The ledger of one event, any status.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/wagers",
    tag = "Events",
    summary = "List an event's wagers",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event ledger"),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_event_wagers(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, CoreError> {
    let wagers = state
        .settlement
        .list_event_wagers(EventId::from_uuid(id))
        .await?;
    Ok(Json(WagerListResponse::from_wagers(wagers)))
}

/// Event lifecycle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/active", get(active_event))
        .route("/events/active/close", post(close_wagering))
        .route("/events/active/open", post(open_wagering))
        .route("/events/active/resolve", post(resolve_event))
        .route("/events/reset", post(reset_event))
        .route("/events/{id}/wagers", get(list_event_wagers))
}
