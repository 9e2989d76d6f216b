//! Event-related DTOs: active summary, lifecycle actions, resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::prize::Settlement;
use crate::domain::WagerEvent;
use crate::service::settlement::{EventSummary, ResetResult, Resolution};

/// One event as returned by the API.
#[derive(Debug, Serialize)]
pub struct EventDto {
    /// Event identifier.
    pub id: Uuid,
    /// Unique human-facing code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Ordered outcome set.
    pub outcomes: Vec<String>,
    /// Whether wagers may currently be placed.
    pub open: bool,
    /// Winning outcome once resolved.
    pub winner: Option<String>,
    /// `active` / `resolved` / `archived`.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Resolution or archival timestamp.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<WagerEvent> for EventDto {
    fn from(event: WagerEvent) -> Self {
        Self {
            id: *event.id.as_uuid(),
            code: event.code,
            name: event.name,
            outcomes: event.outcomes,
            open: event.open,
            winner: event.winner,
            status: event.status.as_str().to_string(),
            created_at: event.created_at,
            resolved_at: event.resolved_at,
        }
    }
}

/// Per-outcome staked total.
#[derive(Debug, Serialize)]
pub struct OutcomeTotalDto {
    /// Outcome name.
    pub outcome: String,
    /// Sum of stakes backing it.
    pub total: f64,
}

/// Response body for `GET /events/active`.
#[derive(Debug, Serialize)]
pub struct EventSummaryResponse {
    /// The active event.
    pub event: EventDto,
    /// Per-outcome totals in outcome order.
    pub totals: Vec<OutcomeTotalDto>,
    /// Sum of all stakes.
    pub gross_total: f64,
    /// Fee-discounted prize pool.
    pub net_pool: f64,
}

impl From<EventSummary> for EventSummaryResponse {
    fn from(summary: EventSummary) -> Self {
        Self {
            event: EventDto::from(summary.event),
            totals: summary
                .totals
                .into_iter()
                .map(|t| OutcomeTotalDto {
                    outcome: t.outcome,
                    total: t.total,
                })
                .collect(),
            gross_total: summary.gross_total,
            net_pool: summary.net_pool,
        }
    }
}

/// Request body for `POST /events/active/open` and `.../close`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleRequest {
    /// The acting event manager.
    pub user_id: Uuid,
}

/// Request body for `POST /events/active/resolve`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveRequest {
    /// The acting event manager.
    pub user_id: Uuid,
    /// Winning outcome.
    pub winner: String,
}

/// Response body for `POST /events/active/resolve`.
#[derive(Debug, Serialize)]
pub struct ResolutionResponse {
    /// The resolved event.
    pub event: EventDto,
    /// Where the money went.
    pub settlement: Settlement,
}

impl From<Resolution> for ResolutionResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            event: EventDto::from(resolution.event),
            settlement: resolution.settlement,
        }
    }
}

/// Request body for `POST /events/reset`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetRequest {
    /// The acting event manager.
    pub user_id: Uuid,
    /// Optional name for the new event.
    #[serde(default)]
    pub name: Option<String>,
    /// Outcome set of the new event (2..10 distinct entries).
    pub outcomes: Vec<String>,
}

/// Response body for `POST /events/reset`.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Event archived by the reset, if one was active.
    pub archived_event_id: Option<Uuid>,
    /// The new active event.
    pub event: EventDto,
}

impl From<ResetResult> for ResetResponse {
    fn from(reset: ResetResult) -> Self {
        Self {
            archived_event_id: reset.archived_event_id.map(|id| *id.as_uuid()),
            event: EventDto::from(reset.event),
        }
    }
}
