//! Wager entity.
//!
//! A [`Wager`] is one immutable stake: who staked, how much, on which
//! outcome, in which event. There is no update or delete operation in
//! the domain; the ledger is append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventId, Money};
use crate::error::CoreError;

/// One stake in the pool, immutable once created.
///
/// Created only through the settlement orchestrator's placement path,
/// while the target event is active and open. `bettor_name` is
/// denormalized from the user at creation time so historical
/// distributions keep their names even if the user record changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wager {
    /// Unique wager identifier.
    pub id: Uuid,
    /// User the wager is attributed to (non-owning).
    pub user_id: Uuid,
    /// Event this wager belongs to.
    pub event_id: EventId,
    /// Bettor display name at placement time.
    pub bettor_name: String,
    /// Outcome the stake backs.
    pub outcome: String,
    /// Validated stake amount.
    pub amount: Money,
    /// Placement timestamp.
    pub created_at: DateTime<Utc>,
}

impl Wager {
    /// Creates a new wager record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the outcome or bettor name
    /// is empty. Amount validity is guaranteed by [`Money`].
    pub fn new(
        user_id: Uuid,
        event_id: EventId,
        bettor_name: &str,
        outcome: &str,
        amount: Money,
    ) -> Result<Self, CoreError> {
        if outcome.trim().is_empty() {
            return Err(CoreError::Validation(
                "wager outcome must not be empty".to_string(),
            ));
        }
        if bettor_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "bettor name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            bettor_name: bettor_name.trim().to_string(),
            outcome: outcome.trim().to_string(),
            amount,
            created_at: Utc::now(),
        })
    }
}
