//! PostgreSQL implementations of the repository contracts.
//!
//! All multi-step sequences (archiving the prior active event on
//! create, finalizing an event with its settlement history) run inside
//! a single sqlx transaction; a failure anywhere rolls everything
//! back. The `events` table additionally carries a partial unique
//! index on `status = 'active'` (see `migrations/`), so the
//! single-active-event invariant holds even under concurrent resets.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{EventRow, UserRow, WagerRow};
use super::repository::{EventRepository, UserRepository, WagerRepository};
use crate::domain::prize::Settlement;
use crate::domain::{EventId, EventStatus, User, Wager, WagerEvent};
use crate::error::CoreError;

fn persistence_err(e: sqlx::Error) -> CoreError {
    CoreError::Persistence(e.to_string())
}

/// Users stored in the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, is_admin, is_superadmin FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, is_admin, is_superadmin FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(row.map(User::from))
    }

    async fn list_all(&self) -> Result<Vec<User>, CoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, is_admin, is_superadmin FROM users ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn create(&self, user: &User) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, is_admin, is_superadmin) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.is_admin)
        .bind(user.is_superadmin)
        .execute(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), CoreError> {
        sqlx::query(
            "UPDATE users SET name = $2, email = $3, is_admin = $4, is_superadmin = $5 \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.is_admin)
        .bind(user.is_superadmin)
        .execute(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(())
    }
}

/// Events stored in the `events` table, history in `settlements`.
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_EVENT: &str = "SELECT id, code, name, outcomes, open, winner, status, \
     created_at, resolved_at FROM events";

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn find_active(&self) -> Result<Option<WagerEvent>, CoreError> {
        let row = sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENT} WHERE status = 'active'"))
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_err)?;
        row.map(WagerEvent::try_from).transpose()
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<WagerEvent>, CoreError> {
        let row = sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_err)?;
        row.map(WagerEvent::try_from).transpose()
    }

    async fn create(&self, event: &WagerEvent) -> Result<(), CoreError> {
        let outcomes = serde_json::to_value(&event.outcomes)
            .map_err(|e| CoreError::Internal(format!("outcomes serialization: {e}")))?;

        let mut tx = self.pool.begin().await.map_err(persistence_err)?;

        // Retire whatever event is currently active before inserting the
        // new one; the partial unique index rejects a second active row
        // if another reset races this one.
        sqlx::query(
            "UPDATE events SET status = 'archived', \
             resolved_at = COALESCE(resolved_at, NOW()) WHERE status = 'active'",
        )
        .execute(&mut *tx)
        .await
        .map_err(persistence_err)?;

        sqlx::query(
            "INSERT INTO events (id, code, name, outcomes, open, winner, status, \
             created_at, resolved_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(event.id.as_uuid())
        .bind(&event.code)
        .bind(&event.name)
        .bind(outcomes)
        .bind(event.open)
        .bind(&event.winner)
        .bind(event.status.as_str())
        .bind(event.created_at)
        .bind(event.resolved_at)
        .execute(&mut *tx)
        .await
        .map_err(persistence_err)?;

        tx.commit().await.map_err(persistence_err)
    }

    async fn update(&self, event: &WagerEvent) -> Result<(), CoreError> {
        sqlx::query(
            "UPDATE events SET open = $2, winner = $3, status = $4, resolved_at = $5 \
             WHERE id = $1",
        )
        .bind(event.id.as_uuid())
        .bind(event.open)
        .bind(&event.winner)
        .bind(event.status.as_str())
        .bind(event.resolved_at)
        .execute(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(())
    }

    async fn archive(&self, id: EventId) -> Result<(), CoreError> {
        sqlx::query(
            "UPDATE events SET status = 'archived', \
             resolved_at = COALESCE(resolved_at, NOW()) WHERE id = $1",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(())
    }

    async fn finalize(
        &self,
        event: &WagerEvent,
        settlement: &Settlement,
    ) -> Result<(), CoreError> {
        debug_assert_eq!(event.status, EventStatus::Resolved);
        let shares = serde_json::to_value(&settlement.shares)
            .map_err(|e| CoreError::Internal(format!("shares serialization: {e}")))?;

        let mut tx = self.pool.begin().await.map_err(persistence_err)?;

        sqlx::query(
            "UPDATE events SET open = $2, winner = $3, status = $4, resolved_at = $5 \
             WHERE id = $1",
        )
        .bind(event.id.as_uuid())
        .bind(event.open)
        .bind(&event.winner)
        .bind(event.status.as_str())
        .bind(event.resolved_at)
        .execute(&mut *tx)
        .await
        .map_err(persistence_err)?;

        sqlx::query(
            "INSERT INTO settlements (event_id, winner, gross_total, fee_amount, \
             net_pool, shares) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(event.id.as_uuid())
        .bind(&settlement.winner)
        .bind(settlement.gross_total)
        .bind(settlement.fee_amount)
        .bind(settlement.net_pool)
        .bind(shares)
        .execute(&mut *tx)
        .await
        .map_err(persistence_err)?;

        tx.commit().await.map_err(persistence_err)
    }
}

/// The append-only wager ledger in the `wagers` table.
#[derive(Debug, Clone)]
pub struct PgWagerRepository {
    pool: PgPool,
}

impl PgWagerRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_WAGER: &str = "SELECT id, user_id, event_id, bettor_name, outcome, amount, \
     created_at FROM wagers";

#[async_trait]
impl WagerRepository for PgWagerRepository {
    async fn create(&self, wager: &Wager) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO wagers (id, user_id, event_id, bettor_name, outcome, amount, \
             created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(wager.id)
        .bind(wager.user_id)
        .bind(wager.event_id.as_uuid())
        .bind(&wager.bettor_name)
        .bind(&wager.outcome)
        .bind(wager.amount.as_float())
        .bind(wager.created_at)
        .execute(&self.pool)
        .await
        .map_err(persistence_err)?;
        Ok(())
    }

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Wager>, CoreError> {
        let rows = sqlx::query_as::<_, WagerRow>(&format!(
            "{SELECT_WAGER} WHERE event_id = $1 ORDER BY created_at ASC"
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_err)?;
        rows.into_iter().map(Wager::try_from).collect()
    }

    async fn list_by_user_and_event(
        &self,
        user_id: Uuid,
        event_id: EventId,
    ) -> Result<Vec<Wager>, CoreError> {
        let rows = sqlx::query_as::<_, WagerRow>(&format!(
            "{SELECT_WAGER} WHERE user_id = $1 AND event_id = $2 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_err)?;
        rows.into_iter().map(Wager::try_from).collect()
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Wager>, CoreError> {
        let rows = sqlx::query_as::<_, WagerRow>(&format!(
            "{SELECT_WAGER} WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_err)?;
        rows.into_iter().map(Wager::try_from).collect()
    }
}
