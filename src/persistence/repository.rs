//! Repository contracts consumed by the settlement orchestrator.
//!
//! The core never talks to the database directly; it goes through
//! these traits. The Postgres implementations live in
//! [`super::postgres`]; tests substitute in-memory fakes.

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::prize::Settlement;
use crate::domain::{EventId, User, Wager, WagerEvent};
use crate::error::CoreError;

/// Storage contract for users.
#[async_trait]
pub trait UserRepository: fmt::Debug + Send + Sync {
    /// Looks a user up by id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError>;

    /// Looks a user up by email.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    /// Lists every user.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn list_all(&self) -> Result<Vec<User>, CoreError>;

    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn create(&self, user: &User) -> Result<(), CoreError>;

    /// Persists changed capability flags or profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn update(&self, user: &User) -> Result<(), CoreError>;
}

/// Storage contract for wagering events.
///
/// The "exactly one active event" invariant belongs to this layer:
/// [`EventRepository::create`] archives any currently-active event and
/// inserts the new one in a single transaction, backed by a partial
/// unique index on `status = 'active'`, so two concurrent resets
/// cannot both create "the" active event.
#[async_trait]
pub trait EventRepository: fmt::Debug + Send + Sync {
    /// Returns the single active event, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn find_active(&self) -> Result<Option<WagerEvent>, CoreError>;

    /// Looks an event up by id, regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn find_by_id(&self, id: EventId) -> Result<Option<WagerEvent>, CoreError>;

    /// Inserts a new active event, atomically archiving the previous
    /// active one (its wagers stay under its own id).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn create(&self, event: &WagerEvent) -> Result<(), CoreError>;

    /// Persists an updated event state (open/closed toggles).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn update(&self, event: &WagerEvent) -> Result<(), CoreError>;

    /// Marks an event archived without creating a successor.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn archive(&self, id: EventId) -> Result<(), CoreError>;

    /// Persists a resolved event together with its settlement history
    /// record, in one transaction: either the event becomes resolved
    /// AND the history row exists, or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure; no
    /// partial state remains visible.
    async fn finalize(&self, event: &WagerEvent, settlement: &Settlement)
    -> Result<(), CoreError>;
}

/// Storage contract for the append-only wager ledger.
#[async_trait]
pub trait WagerRepository: fmt::Debug + Send + Sync {
    /// Appends a wager. Concurrent inserts are independent; no locking
    /// beyond the database's own row-level control.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn create(&self, wager: &Wager) -> Result<(), CoreError>;

    /// All wagers of one event, in placement order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Wager>, CoreError>;

    /// One user's wagers on one event, in placement order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn list_by_user_and_event(
        &self,
        user_id: Uuid,
        event_id: EventId,
    ) -> Result<Vec<Wager>, CoreError>;

    /// One user's full wager history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] on storage failure.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Wager>, CoreError>;
}
