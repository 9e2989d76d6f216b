//! Wagering event state machine.
//!
//! A [`WagerEvent`] represents one round of the pool: a fixed outcome
//! set, an open/closed flag gating wager placement, and a status that
//! moves `active → resolved` (by defining a winner) or
//! `active → archived` (manual reset). Transitions are pure: each one
//! consumes the event and returns the next state or an error, so the
//! state machine is testable without shared mutable objects and the
//! orchestrator persists only the returned value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventId;
use crate::error::CoreError;

/// Minimum number of outcomes an event must offer.
pub const MIN_OUTCOMES: usize = 2;
/// Maximum number of outcomes an event may offer.
pub const MAX_OUTCOMES: usize = 10;

/// Lifecycle status of a wagering event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// The current round; at most one event is active at a time.
    Active,
    /// A winner has been defined and prizes were distributed.
    Resolved,
    /// Retired by a manual reset; kept for history with its wagers.
    Archived,
}

impl EventStatus {
    /// Database/wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
            Self::Archived => "archived",
        }
    }

    /// Parses the database representation back into a status.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Internal`] on an unknown status string,
    /// which can only come from a corrupted row.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::Internal(format!("unknown event status: {other}"))),
        }
    }
}

/// One wagering round.
///
/// Invariants, enforced at construction and on every transition:
/// - 2 to 10 distinct outcomes;
/// - `winner.is_some()` implies `status == Resolved`;
/// - a winner is defined exactly once, only while closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Unique human-facing code, `event-<unix-timestamp>` if not given.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Ordered outcome set ("teams"); immutable after creation.
    pub outcomes: Vec<String>,
    /// Whether wagers may currently be placed.
    pub open: bool,
    /// Winning outcome, set exactly once by [`WagerEvent::define_winner`].
    pub winner: Option<String>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Set when the event is resolved or archived.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl WagerEvent {
    /// Creates a new active, open event.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the outcome count is
    /// outside 2..=10 or the outcomes are not all distinct.
    pub fn new(name: Option<String>, outcomes: Vec<String>) -> Result<Self, CoreError> {
        let outcomes: Vec<String> = outcomes
            .into_iter()
            .map(|o| o.trim().to_string())
            .collect();

        if outcomes.len() < MIN_OUTCOMES || outcomes.len() > MAX_OUTCOMES {
            return Err(CoreError::Validation(format!(
                "an event needs between {MIN_OUTCOMES} and {MAX_OUTCOMES} outcomes, got {}",
                outcomes.len()
            )));
        }
        if outcomes.iter().any(String::is_empty) {
            return Err(CoreError::Validation(
                "outcome names must not be empty".to_string(),
            ));
        }
        for (i, outcome) in outcomes.iter().enumerate() {
            if outcomes.iter().skip(i + 1).any(|other| other == outcome) {
                return Err(CoreError::Validation(format!(
                    "duplicate outcome: {outcome}"
                )));
            }
        }

        let now = Utc::now();
        let id = EventId::new();
        // The timestamp alone collides when two events are created
        // within the same second; a fragment of the id keeps the code
        // unique, which the schema requires.
        let frag: String = id.as_uuid().simple().to_string().chars().take(8).collect();
        let code = format!("event-{}-{frag}", now.timestamp());
        Ok(Self {
            id,
            name: name.unwrap_or_else(|| code.clone()),
            code,
            outcomes,
            open: true,
            winner: None,
            status: EventStatus::Active,
            created_at: now,
            resolved_at: None,
        })
    }

    /// Closes wagering.
    ///
    /// Closing an already-closed active event is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] if the event is not active.
    pub fn close(mut self) -> Result<Self, CoreError> {
        if self.status != EventStatus::Active {
            return Err(CoreError::InvalidState(
                "only active events can be closed".to_string(),
            ));
        }
        self.open = false;
        Ok(self)
    }

    /// Reopens wagering.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] if the event is not active,
    /// or (with a distinct message) if a winner is already set.
    pub fn open(mut self) -> Result<Self, CoreError> {
        if self.status != EventStatus::Active {
            return Err(CoreError::InvalidState(
                "only active events can be opened".to_string(),
            ));
        }
        if self.winner.is_some() {
            return Err(CoreError::InvalidState(
                "an event with a winner cannot be reopened".to_string(),
            ));
        }
        self.open = true;
        Ok(self)
    }

    /// Defines the winning outcome and resolves the event.
    ///
    /// Requires the event to be active and closed: closing is the
    /// write barrier that freezes the wager set before settlement.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] if the event is not active
    /// or wagering is still open, and [`CoreError::Validation`] if the
    /// outcome is not a member of the outcome set.
    pub fn define_winner(mut self, outcome: &str) -> Result<Self, CoreError> {
        if self.status != EventStatus::Active {
            return Err(CoreError::InvalidState(
                "only active events can be resolved".to_string(),
            ));
        }
        if self.open {
            return Err(CoreError::InvalidState(
                "close wagering before defining a winner".to_string(),
            ));
        }
        if !self.contains_outcome(outcome) {
            return Err(CoreError::Validation(format!(
                "unknown outcome: {outcome}"
            )));
        }
        self.winner = Some(outcome.to_string());
        self.status = EventStatus::Resolved;
        self.resolved_at = Some(Utc::now());
        Ok(self)
    }

    /// Archives the event, from any status.
    ///
    /// Used both to retire a resolved event and to abandon an active
    /// one on manual reset. Wagers are preserved under the event's id.
    #[must_use]
    pub fn archive(mut self) -> Self {
        self.status = EventStatus::Archived;
        if self.resolved_at.is_none() {
            self.resolved_at = Some(Utc::now());
        }
        self
    }

    /// Returns `true` if `name` is one of this event's outcomes.
    #[must_use]
    pub fn contains_outcome(&self, name: &str) -> bool {
        self.outcomes.iter().any(|o| o == name)
    }
}
