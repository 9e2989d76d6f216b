//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::SettlementService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Settlement service for all business logic.
    pub settlement: Arc<SettlementService>,
}
