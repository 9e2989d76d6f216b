//! REST endpoint handlers organized by resource.

pub mod event;
pub mod system;
pub mod user;
pub mod wager;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(wager::routes())
        .merge(event::routes())
        .merge(user::routes())
}
