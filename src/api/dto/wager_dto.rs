//! Wager-related DTOs: placement, listing, and return estimation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::money::RawAmount;
use crate::domain::Wager;

/// Request body for `POST /wagers`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceWagerRequest {
    /// The betting user (authenticated by the excluded session layer).
    pub user_id: Uuid,
    /// Outcome to back.
    pub outcome: String,
    /// Stake amount: JSON number or numeric string.
    pub amount: RawAmount,
}

/// One wager as returned by the API.
#[derive(Debug, Serialize)]
pub struct WagerDto {
    /// Wager identifier.
    pub id: Uuid,
    /// Attributed user.
    pub user_id: Uuid,
    /// Owning event.
    pub event_id: Uuid,
    /// Bettor display name at placement time.
    pub bettor_name: String,
    /// Backed outcome.
    pub outcome: String,
    /// Stake in currency units.
    pub amount: f64,
    /// Stake rendered for display, e.g. `R$ 100,50`.
    pub amount_formatted: String,
    /// Placement timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Wager> for WagerDto {
    fn from(wager: Wager) -> Self {
        Self {
            id: wager.id,
            user_id: wager.user_id,
            event_id: *wager.event_id.as_uuid(),
            bettor_name: wager.bettor_name,
            outcome: wager.outcome,
            amount: wager.amount.as_float(),
            amount_formatted: wager.amount.format_currency(),
            created_at: wager.created_at,
        }
    }
}

/// Query parameters for `GET /wagers/estimate`.
#[derive(Debug, Deserialize)]
pub struct EstimateParams {
    /// Outcome to simulate backing.
    pub outcome: String,
    /// Hypothetical stake amount.
    pub amount: f64,
}

/// Response body for `GET /wagers/estimate`.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// Outcome simulated.
    pub outcome: String,
    /// Hypothetical stake echoed from the request.
    pub amount: f64,
    /// Estimated gross return if this outcome wins.
    pub estimated_return: f64,
}

/// Response body for wager list endpoints.
#[derive(Debug, Serialize)]
pub struct WagerListResponse {
    /// The wagers.
    pub data: Vec<WagerDto>,
    /// Number of wagers returned.
    pub total: usize,
}

impl WagerListResponse {
    /// Wraps domain wagers into the list envelope.
    #[must_use]
    pub fn from_wagers(wagers: Vec<Wager>) -> Self {
        let data: Vec<WagerDto> = wagers.into_iter().map(WagerDto::from).collect();
        Self {
            total: data.len(),
            data,
        }
    }
}
