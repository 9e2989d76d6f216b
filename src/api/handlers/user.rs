//! User management handlers: listing, promote, demote.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{AdminActionRequest, ListUsersParams, UserDto, UserListResponse};
use crate::app_state::AppState;
use crate::error::{CoreError, ErrorResponse};

/// `GET /users` — List all users (superadmin only).
///
/// # Errors
///
/// Returns [`CoreError::Permission`] unless the actor manages users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    summary = "List users",
    responses(
        (status = 200, description = "All users with derived roles"),
        (status = 403, description = "Not a superadmin", body = ErrorResponse),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<impl IntoResponse, CoreError> {
    let users = state.settlement.list_users(params.actor_id).await?;
    let data: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Json(UserListResponse {
        total: data.len(),
        data,
    }))
}

/// `POST /users/:id/promote` — Grant the admin flag.
///
/// # Errors
///
/// Returns [`CoreError::Permission`] unless the actor is a superadmin
/// and the target is not one.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/promote",
    tag = "Users",
    summary = "Promote a user to admin",
    params(
        ("id" = uuid::Uuid, Path, description = "Target user UUID"),
    ),
    request_body = AdminActionRequest,
    responses(
        (status = 200, description = "User promoted"),
        (status = 403, description = "Actor or target not eligible", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn promote_user(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<AdminActionRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let user = state.settlement.promote_user(req.actor_id, id).await?;
    Ok(Json(UserDto::from(user)))
}

/// `POST /users/:id/demote` — Revoke the admin flag.
///
/// # Errors
///
/// Same shape as [`promote_user`].
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/demote",
    tag = "Users",
    summary = "Demote a user from admin",
    params(
        ("id" = uuid::Uuid, Path, description = "Target user UUID"),
    ),
    request_body = AdminActionRequest,
    responses(
        (status = 200, description = "User demoted"),
        (status = 403, description = "Actor or target not eligible", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn demote_user(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<AdminActionRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let user = state.settlement.demote_user(req.actor_id, id).await?;
    Ok(Json(UserDto::from(user)))
}

/// User management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}/promote", post(promote_user))
        .route("/users/{id}/demote", post(demote_user))
}
