//! Database row models and conversions into domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{EventId, EventStatus, Money, User, Wager, WagerEvent};
use crate::error::CoreError;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Event-management flag.
    pub is_admin: bool,
    /// User-management flag.
    pub is_superadmin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            is_admin: row.is_admin,
            is_superadmin: row.is_superadmin,
        }
    }
}

/// A row from the `events` table. Outcomes are stored as JSONB.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Primary key.
    pub id: Uuid,
    /// Unique human-facing code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// JSONB array of outcome names.
    pub outcomes: serde_json::Value,
    /// Wagering open flag.
    pub open: bool,
    /// Winning outcome once resolved.
    pub winner: Option<String>,
    /// Status string (`active` / `resolved` / `archived`).
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Resolution or archival timestamp.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl TryFrom<EventRow> for WagerEvent {
    type Error = CoreError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let outcomes: Vec<String> = serde_json::from_value(row.outcomes)
            .map_err(|e| CoreError::Internal(format!("corrupt outcomes column: {e}")))?;
        Ok(Self {
            id: EventId::from_uuid(row.id),
            code: row.code,
            name: row.name,
            outcomes,
            open: row.open,
            winner: row.winner,
            status: EventStatus::parse(&row.status)?,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
        })
    }
}

/// A row from the `wagers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WagerRow {
    /// Primary key.
    pub id: Uuid,
    /// Attributed user.
    pub user_id: Uuid,
    /// Owning event.
    pub event_id: Uuid,
    /// Bettor display name at placement time.
    pub bettor_name: String,
    /// Backed outcome.
    pub outcome: String,
    /// Stake amount in currency units.
    pub amount: f64,
    /// Placement timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<WagerRow> for Wager {
    type Error = CoreError;

    fn try_from(row: WagerRow) -> Result<Self, Self::Error> {
        // A stored amount below the minimum stake can only come from a
        // corrupted row; surface it as internal, not as caller input.
        let amount = Money::new(row.amount)
            .map_err(|e| CoreError::Internal(format!("corrupt wager amount: {e}")))?;
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            event_id: EventId::from_uuid(row.event_id),
            bettor_name: row.bettor_name,
            outcome: row.outcome,
            amount,
            created_at: row.created_at,
        })
    }
}
