//! Settlement service: orchestrates wagering and settlement.
//!
//! The only component that talks to the repository collaborators.
//! Every operation follows the pattern: permission check → pure state
//! transition on the domain → persist the returned state. Domain
//! failures surface unchanged; the service only adds transaction
//! boundaries (inside the repositories) around multi-step sequences.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::money::RawAmount;
use crate::domain::prize::{self, Settlement};
use crate::domain::{EventId, PlatformFee, User, Wager, WagerEvent, permissions};
use crate::error::CoreError;
use crate::persistence::{EventRepository, UserRepository, WagerRepository};

/// Per-outcome staked total for display and estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeTotal {
    /// Outcome name.
    pub outcome: String,
    /// Sum of stakes backing it.
    pub total: f64,
}

/// Read-model of the active event for display.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    /// The active event.
    pub event: WagerEvent,
    /// Per-outcome totals, in outcome order; unstaked outcomes are 0.
    pub totals: Vec<OutcomeTotal>,
    /// Sum of all stakes.
    pub gross_total: f64,
    /// Fee-discounted pool.
    pub net_pool: f64,
}

/// Result of a manual reset.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetResult {
    /// Id of the event archived by the reset, if one was active.
    pub archived_event_id: Option<EventId>,
    /// The newly created active event.
    pub event: WagerEvent,
}

/// Result of resolving the active event.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The resolved event.
    pub event: WagerEvent,
    /// The recorded settlement.
    pub settlement: Settlement,
}

/// Coordinator for all cross-entity operations.
///
/// Holds the repository collaborators behind trait objects and the
/// fee policy fixed at construction. Stateless otherwise.
#[derive(Debug, Clone)]
pub struct SettlementService {
    users: Arc<dyn UserRepository>,
    events: Arc<dyn EventRepository>,
    wagers: Arc<dyn WagerRepository>,
    fee: PlatformFee,
}

impl SettlementService {
    /// Creates a new `SettlementService`.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        events: Arc<dyn EventRepository>,
        wagers: Arc<dyn WagerRepository>,
        fee: PlatformFee,
    ) -> Self {
        Self {
            users,
            events,
            wagers,
            fee,
        }
    }

    /// Returns the fee policy in effect.
    #[must_use]
    pub const fn fee(&self) -> &PlatformFee {
        &self.fee
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, CoreError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("user {user_id}")))
    }

    async fn load_active_event(&self) -> Result<WagerEvent, CoreError> {
        self.events
            .find_active()
            .await?
            .ok_or_else(|| CoreError::NotFound("no active event".to_string()))
    }

    /// Places a wager on the active event.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the user or active event is missing;
    /// [`CoreError::Permission`] if the user may not wager;
    /// [`CoreError::InvalidState`] if wagering is closed;
    /// [`CoreError::Validation`] on an unknown outcome or bad amount.
    /// Nothing is persisted on any failure.
    pub async fn place_wager(
        &self,
        user_id: Uuid,
        outcome: &str,
        amount: RawAmount,
    ) -> Result<Wager, CoreError> {
        let user = self.load_user(user_id).await?;
        if !permissions::can_wager(&user) {
            return Err(CoreError::Permission(
                "superadmins may not place wagers".to_string(),
            ));
        }

        let event = self.load_active_event().await?;
        if !event.open {
            return Err(CoreError::InvalidState(
                "wagering is closed for the active event".to_string(),
            ));
        }
        if !event.contains_outcome(outcome) {
            return Err(CoreError::Validation(format!("unknown outcome: {outcome}")));
        }

        let money = amount.into_money()?;
        let wager = Wager::new(user_id, event.id, &user.name, outcome, money)?;
        self.wagers.create(&wager).await?;

        tracing::info!(
            wager_id = %wager.id,
            event_id = %event.id,
            outcome,
            amount = money.as_float(),
            "wager placed"
        );
        Ok(wager)
    }

    /// Opens or closes wagering on the active event.
    ///
    /// # Errors
    ///
    /// [`CoreError::Permission`] unless the user manages events;
    /// otherwise fails the same way the event transitions would.
    pub async fn toggle_wagering(
        &self,
        user_id: Uuid,
        open: bool,
    ) -> Result<WagerEvent, CoreError> {
        let user = self.load_user(user_id).await?;
        let action = if open {
            permissions::EventAction::Open
        } else {
            permissions::EventAction::Close
        };
        permissions::ensure_event_action(&user, action)?;

        let event = self.load_active_event().await?;
        let event = if open { event.open() } else { event.close() }?;
        self.events.update(&event).await?;

        tracing::info!(event_id = %event.id, open, "wagering toggled");
        Ok(event)
    }

    /// Defines the winner of the active event and settles the pool.
    ///
    /// The resolved event and its settlement history are persisted in
    /// one transaction by [`EventRepository::finalize`]: a crash can
    /// never leave an event resolved without a history record, or vice
    /// versa.
    ///
    /// # Errors
    ///
    /// [`CoreError::Permission`] unless the user manages events;
    /// [`CoreError::InvalidState`] if wagering is still open;
    /// [`CoreError::Validation`] on an unknown winning outcome.
    pub async fn resolve_event(
        &self,
        user_id: Uuid,
        winning_outcome: &str,
    ) -> Result<Resolution, CoreError> {
        let user = self.load_user(user_id).await?;
        permissions::ensure_event_action(&user, permissions::EventAction::DefineWinner)?;

        let event = self.load_active_event().await?;
        let event = event.define_winner(winning_outcome)?;

        // The event was closed before this point, so the ledger read
        // here is the frozen, authoritative wager set.
        let wagers = self.wagers.list_by_event(event.id).await?;
        let settlement = Settlement::compute(&wagers, &self.fee, winning_outcome);

        self.events.finalize(&event, &settlement).await?;

        tracing::info!(
            event_id = %event.id,
            winner = winning_outcome,
            gross = settlement.gross_total,
            net = settlement.net_pool,
            winners = settlement.shares.len(),
            "event resolved"
        );
        Ok(Resolution { event, settlement })
    }

    /// Archives the active event (if any) and starts a fresh one.
    ///
    /// The previous event keeps its wagers under its own id. Archival
    /// and creation happen atomically inside
    /// [`EventRepository::create`].
    ///
    /// # Errors
    ///
    /// [`CoreError::Permission`] unless the user manages events;
    /// [`CoreError::Validation`] on a bad outcome set.
    pub async fn reset_event(
        &self,
        user_id: Uuid,
        name: Option<String>,
        outcomes: Vec<String>,
    ) -> Result<ResetResult, CoreError> {
        let user = self.load_user(user_id).await?;
        permissions::ensure_event_action(&user, permissions::EventAction::Reset)?;

        let archived_event_id = self.events.find_active().await?.map(|e| e.id);
        let event = WagerEvent::new(name, outcomes)?;
        self.events.create(&event).await?;

        tracing::info!(
            event_id = %event.id,
            archived = ?archived_event_id,
            "event reset"
        );
        Ok(ResetResult {
            archived_event_id,
            event,
        })
    }

    /// Returns the active event with per-outcome totals for display.
    ///
    /// The totals are an eventually-consistent snapshot; only
    /// resolution reads the frozen ledger.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if no event is active.
    pub async fn active_event_summary(&self) -> Result<EventSummary, CoreError> {
        let event = self.load_active_event().await?;
        let wagers = self.wagers.list_by_event(event.id).await?;
        let by_outcome = prize::totals_by_outcome(&wagers, &event.outcomes);
        let totals = event
            .outcomes
            .iter()
            .map(|outcome| OutcomeTotal {
                outcome: outcome.clone(),
                total: by_outcome.get(outcome).copied().unwrap_or(0.0),
            })
            .collect();
        Ok(EventSummary {
            gross_total: prize::gross_total(&wagers),
            net_pool: prize::net_prize_pool(&wagers, &self.fee),
            event,
            totals,
        })
    }

    /// Estimates the return of a hypothetical stake on the active
    /// event.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if no event is active;
    /// [`CoreError::Validation`] on an unknown outcome or bad amount.
    pub async fn estimate_return(
        &self,
        outcome: &str,
        amount: RawAmount,
    ) -> Result<f64, CoreError> {
        let event = self.load_active_event().await?;
        if !event.contains_outcome(outcome) {
            return Err(CoreError::Validation(format!("unknown outcome: {outcome}")));
        }
        let money = amount.into_money()?;
        let wagers = self.wagers.list_by_event(event.id).await?;
        Ok(prize::estimate_return(
            &wagers,
            &self.fee,
            outcome,
            money.as_float(),
        ))
    }

    /// One user's full wager history, newest first.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the user does not exist.
    pub async fn list_wagers_for_user(&self, user_id: Uuid) -> Result<Vec<Wager>, CoreError> {
        let user = self.load_user(user_id).await?;
        self.wagers.list_by_user(user.id).await
    }

    /// All wagers of one event, in placement order.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the event does not exist.
    pub async fn list_event_wagers(&self, event_id: EventId) -> Result<Vec<Wager>, CoreError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("event {event_id}")))?;
        self.wagers.list_by_event(event.id).await
    }

    /// Grants the admin flag to `target_id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::Permission`] unless the actor is a superadmin and
    /// the target is not one.
    pub async fn promote_user(&self, actor_id: Uuid, target_id: Uuid) -> Result<User, CoreError> {
        let actor = self.load_user(actor_id).await?;
        let mut target = self.load_user(target_id).await?;
        permissions::ensure_can_promote(&actor, &target)?;

        target.is_admin = true;
        self.users.update(&target).await?;
        tracing::info!(target = %target.id, "user promoted to admin");
        Ok(target)
    }

    /// Revokes the admin flag from `target_id`.
    ///
    /// # Errors
    ///
    /// Same shape as [`SettlementService::promote_user`].
    pub async fn demote_user(&self, actor_id: Uuid, target_id: Uuid) -> Result<User, CoreError> {
        let actor = self.load_user(actor_id).await?;
        let mut target = self.load_user(target_id).await?;
        permissions::ensure_can_demote(&actor, &target)?;

        target.is_admin = false;
        self.users.update(&target).await?;
        tracing::info!(target = %target.id, "user demoted from admin");
        Ok(target)
    }

    /// Lists every registered user, for the management screens.
    ///
    /// # Errors
    ///
    /// [`CoreError::Permission`] unless the actor manages users.
    pub async fn list_users(&self, actor_id: Uuid) -> Result<Vec<User>, CoreError> {
        let actor = self.load_user(actor_id).await?;
        if !permissions::can_manage_users(&actor) {
            return Err(CoreError::Permission(
                "only superadmins can list users".to_string(),
            ));
        }
        self.users.list_all().await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use super::*;
    use crate::domain::EventStatus;

    /// In-memory user store.
    #[derive(Debug, Default)]
    struct MemUsers {
        rows: RwLock<HashMap<Uuid, User>>,
    }

    #[async_trait]
    impl UserRepository for MemUsers {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError> {
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
            Ok(self
                .rows
                .read()
                .await
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn list_all(&self) -> Result<Vec<User>, CoreError> {
            Ok(self.rows.read().await.values().cloned().collect())
        }

        async fn create(&self, user: &User) -> Result<(), CoreError> {
            self.rows.write().await.insert(user.id, user.clone());
            Ok(())
        }

        async fn update(&self, user: &User) -> Result<(), CoreError> {
            self.rows.write().await.insert(user.id, user.clone());
            Ok(())
        }
    }

    /// In-memory event store mirroring the Postgres archiving
    /// semantics, plus a settlement history log.
    #[derive(Debug, Default)]
    struct MemEvents {
        rows: RwLock<HashMap<EventId, WagerEvent>>,
        history: RwLock<Vec<(EventId, Settlement)>>,
    }

    #[async_trait]
    impl EventRepository for MemEvents {
        async fn find_active(&self) -> Result<Option<WagerEvent>, CoreError> {
            Ok(self
                .rows
                .read()
                .await
                .values()
                .find(|e| e.status == EventStatus::Active)
                .cloned())
        }

        async fn find_by_id(&self, id: EventId) -> Result<Option<WagerEvent>, CoreError> {
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn create(&self, event: &WagerEvent) -> Result<(), CoreError> {
            let mut rows = self.rows.write().await;
            for existing in rows.values_mut() {
                if existing.status == EventStatus::Active {
                    *existing = existing.clone().archive();
                }
            }
            rows.insert(event.id, event.clone());
            Ok(())
        }

        async fn update(&self, event: &WagerEvent) -> Result<(), CoreError> {
            self.rows.write().await.insert(event.id, event.clone());
            Ok(())
        }

        async fn archive(&self, id: EventId) -> Result<(), CoreError> {
            let mut rows = self.rows.write().await;
            if let Some(event) = rows.remove(&id) {
                rows.insert(id, event.archive());
            }
            Ok(())
        }

        async fn finalize(
            &self,
            event: &WagerEvent,
            settlement: &Settlement,
        ) -> Result<(), CoreError> {
            self.rows.write().await.insert(event.id, event.clone());
            self.history
                .write()
                .await
                .push((event.id, settlement.clone()));
            Ok(())
        }
    }

    /// In-memory append-only wager ledger.
    #[derive(Debug, Default)]
    struct MemWagers {
        rows: RwLock<Vec<Wager>>,
    }

    #[async_trait]
    impl WagerRepository for MemWagers {
        async fn create(&self, wager: &Wager) -> Result<(), CoreError> {
            self.rows.write().await.push(wager.clone());
            Ok(())
        }

        async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Wager>, CoreError> {
            Ok(self
                .rows
                .read()
                .await
                .iter()
                .filter(|w| w.event_id == event_id)
                .cloned()
                .collect())
        }

        async fn list_by_user_and_event(
            &self,
            user_id: Uuid,
            event_id: EventId,
        ) -> Result<Vec<Wager>, CoreError> {
            Ok(self
                .rows
                .read()
                .await
                .iter()
                .filter(|w| w.user_id == user_id && w.event_id == event_id)
                .cloned()
                .collect())
        }

        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Wager>, CoreError> {
            Ok(self
                .rows
                .read()
                .await
                .iter()
                .filter(|w| w.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    struct Harness {
        service: SettlementService,
        users: Arc<MemUsers>,
        events: Arc<MemEvents>,
        wagers: Arc<MemWagers>,
    }

    async fn make_harness() -> Harness {
        let users = Arc::new(MemUsers::default());
        let events = Arc::new(MemEvents::default());
        let wagers = Arc::new(MemWagers::default());
        let service = SettlementService::new(
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::clone(&events) as Arc<dyn EventRepository>,
            Arc::clone(&wagers) as Arc<dyn WagerRepository>,
            PlatformFee::default(),
        );
        Harness {
            service,
            users,
            events,
            wagers,
        }
    }

    async fn add_user(harness: &Harness, name: &str, is_admin: bool, is_superadmin: bool) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            is_admin,
            is_superadmin,
        };
        let Ok(()) = harness.users.create(&user).await else {
            panic!("in-memory create cannot fail");
        };
        user.id
    }

    async fn add_active_event(harness: &Harness) -> WagerEvent {
        let Ok(event) = WagerEvent::new(
            Some("Final".to_string()),
            vec!["A".to_string(), "B".to_string()],
        ) else {
            panic!("valid outcomes");
        };
        let Ok(()) = harness.events.create(&event).await else {
            panic!("in-memory create cannot fail");
        };
        event
    }

    #[tokio::test]
    async fn place_wager_happy_path() {
        let harness = make_harness().await;
        let bettor = add_user(&harness, "Ana", false, false).await;
        let event = add_active_event(&harness).await;

        let result = harness
            .service
            .place_wager(bettor, "A", RawAmount::Number(100.0))
            .await;
        let Ok(wager) = result else {
            panic!("placement must succeed");
        };
        assert_eq!(wager.event_id, event.id);
        assert_eq!(wager.bettor_name, "Ana");
        assert!((wager.amount.as_float() - 100.0).abs() < 1e-9);

        let Ok(stored) = harness.wagers.list_by_event(event.id).await else {
            panic!("list cannot fail");
        };
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn place_wager_accepts_numeric_string() {
        let harness = make_harness().await;
        let bettor = add_user(&harness, "Ana", false, false).await;
        let _ = add_active_event(&harness).await;

        let result = harness
            .service
            .place_wager(bettor, "A", RawAmount::Text("10,50".to_string()))
            .await;
        let Ok(wager) = result else {
            panic!("comma-decimal string must be accepted");
        };
        assert!((wager.amount.as_float() - 10.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn superadmin_wager_is_rejected_and_not_persisted() {
        let harness = make_harness().await;
        let superadmin = add_user(&harness, "Root", true, true).await;
        let event = add_active_event(&harness).await;

        let result = harness
            .service
            .place_wager(superadmin, "A", RawAmount::Number(100.0))
            .await;
        assert!(matches!(result, Err(CoreError::Permission(_))));

        let Ok(stored) = harness.wagers.list_by_event(event.id).await else {
            panic!("list cannot fail");
        };
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn place_wager_without_active_event() {
        let harness = make_harness().await;
        let bettor = add_user(&harness, "Ana", false, false).await;

        let result = harness
            .service
            .place_wager(bettor, "A", RawAmount::Number(100.0))
            .await;
        let Err(CoreError::NotFound(msg)) = result else {
            panic!("no active event must surface as not found");
        };
        assert!(msg.contains("no active event"));
    }

    #[tokio::test]
    async fn place_wager_on_closed_event() {
        let harness = make_harness().await;
        let bettor = add_user(&harness, "Ana", false, false).await;
        let admin = add_user(&harness, "Admin", true, false).await;
        let _ = add_active_event(&harness).await;

        let Ok(_) = harness.service.toggle_wagering(admin, false).await else {
            panic!("admin closes the event");
        };

        let result = harness
            .service
            .place_wager(bettor, "A", RawAmount::Number(100.0))
            .await;
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }

    #[tokio::test]
    async fn place_wager_validation_failures() {
        let harness = make_harness().await;
        let bettor = add_user(&harness, "Ana", false, false).await;
        let _ = add_active_event(&harness).await;

        let unknown = harness
            .service
            .place_wager(bettor, "C", RawAmount::Number(100.0))
            .await;
        assert!(matches!(unknown, Err(CoreError::Validation(_))));

        let too_small = harness
            .service
            .place_wager(bettor, "A", RawAmount::Number(0.5))
            .await;
        assert!(matches!(too_small, Err(CoreError::Validation(_))));

        let garbage = harness
            .service
            .place_wager(bettor, "A", RawAmount::Text("ten".to_string()))
            .await;
        assert!(matches!(garbage, Err(CoreError::Validation(_))));

        let missing_user = harness
            .service
            .place_wager(Uuid::new_v4(), "A", RawAmount::Number(100.0))
            .await;
        assert!(matches!(missing_user, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn toggle_requires_event_manager() {
        let harness = make_harness().await;
        let bettor = add_user(&harness, "Ana", false, false).await;
        let _ = add_active_event(&harness).await;

        let result = harness.service.toggle_wagering(bettor, false).await;
        assert!(matches!(result, Err(CoreError::Permission(_))));
    }

    #[tokio::test]
    async fn toggle_round_trip() {
        let harness = make_harness().await;
        let admin = add_user(&harness, "Admin", true, false).await;
        let _ = add_active_event(&harness).await;

        let Ok(closed) = harness.service.toggle_wagering(admin, false).await else {
            panic!("close succeeds");
        };
        assert!(!closed.open);

        let Ok(reopened) = harness.service.toggle_wagering(admin, true).await else {
            panic!("reopen succeeds");
        };
        assert!(reopened.open);
    }

    #[tokio::test]
    async fn resolve_full_scenario() {
        let harness = make_harness().await;
        let admin = add_user(&harness, "Admin", true, false).await;
        let ana = add_user(&harness, "Ana", false, false).await;
        let beto = add_user(&harness, "Beto", false, false).await;
        let caio = add_user(&harness, "Caio", false, false).await;
        let event = add_active_event(&harness).await;

        for (user, outcome, amount) in
            [(ana, "A", 100.0), (beto, "A", 200.0), (caio, "B", 150.0)]
        {
            let Ok(_) = harness
                .service
                .place_wager(user, outcome, RawAmount::Number(amount))
                .await
            else {
                panic!("placement succeeds");
            };
        }

        // Open events cannot be resolved.
        let premature = harness.service.resolve_event(admin, "A").await;
        assert!(matches!(premature, Err(CoreError::InvalidState(_))));

        let Ok(_) = harness.service.toggle_wagering(admin, false).await else {
            panic!("close succeeds");
        };
        let Ok(resolution) = harness.service.resolve_event(admin, "A").await else {
            panic!("resolution succeeds");
        };

        assert_eq!(resolution.event.status, EventStatus::Resolved);
        assert_eq!(resolution.event.winner.as_deref(), Some("A"));
        assert!((resolution.settlement.gross_total - 450.0).abs() < 1e-9);
        assert!((resolution.settlement.net_pool - 427.5).abs() < 1e-9);
        assert_eq!(resolution.settlement.shares.len(), 2);

        // History recorded atomically with the event update.
        let history = harness.events.history.read().await;
        assert_eq!(history.len(), 1);
        let Some((recorded_id, recorded)) = history.first() else {
            panic!("one history record expected");
        };
        assert_eq!(*recorded_id, event.id);
        assert!((recorded.net_pool - 427.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn resolve_requires_event_manager() {
        let harness = make_harness().await;
        let bettor = add_user(&harness, "Ana", false, false).await;
        let _ = add_active_event(&harness).await;

        let result = harness.service.resolve_event(bettor, "A").await;
        assert!(matches!(result, Err(CoreError::Permission(_))));
    }

    #[tokio::test]
    async fn reset_archives_previous_event_with_wagers() {
        let harness = make_harness().await;
        let admin = add_user(&harness, "Admin", true, false).await;
        let ana = add_user(&harness, "Ana", false, false).await;
        let first = add_active_event(&harness).await;

        let Ok(_) = harness
            .service
            .place_wager(ana, "A", RawAmount::Number(50.0))
            .await
        else {
            panic!("placement succeeds");
        };

        let Ok(reset) = harness
            .service
            .reset_event(
                admin,
                Some("Round 2".to_string()),
                vec!["X".to_string(), "Y".to_string()],
            )
            .await
        else {
            panic!("reset succeeds");
        };
        assert_eq!(reset.archived_event_id, Some(first.id));
        assert_eq!(reset.event.name, "Round 2");

        // Exactly one active event after two sequential resets.
        let Ok(reset_again) = harness
            .service
            .reset_event(admin, None, vec!["P".to_string(), "Q".to_string()])
            .await
        else {
            panic!("second reset succeeds");
        };
        assert_eq!(reset_again.archived_event_id, Some(reset.event.id));

        let rows = harness.events.rows.read().await;
        let active_count = rows
            .values()
            .filter(|e| e.status == EventStatus::Active)
            .count();
        assert_eq!(active_count, 1);

        // The first event is archived and its wagers stay queryable.
        let Some(archived) = rows.get(&first.id) else {
            panic!("archived event must remain");
        };
        assert_eq!(archived.status, EventStatus::Archived);
        drop(rows);

        let Ok(kept) = harness.service.list_event_wagers(first.id).await else {
            panic!("archived event wagers stay queryable");
        };
        assert_eq!(kept.len(), 1);
    }

    #[tokio::test]
    async fn reset_rejects_bad_outcomes_before_touching_storage() {
        let harness = make_harness().await;
        let admin = add_user(&harness, "Admin", true, false).await;
        let first = add_active_event(&harness).await;

        let result = harness
            .service
            .reset_event(admin, None, vec!["only-one".to_string()])
            .await;
        assert!(matches!(result, Err(CoreError::Validation(_))));

        // The active event survives a failed reset.
        let Ok(Some(active)) = harness.events.find_active().await else {
            panic!("active event must survive");
        };
        assert_eq!(active.id, first.id);
    }

    #[tokio::test]
    async fn summary_and_estimate() {
        let harness = make_harness().await;
        let ana = add_user(&harness, "Ana", false, false).await;
        let _ = add_active_event(&harness).await;

        let Ok(_) = harness
            .service
            .place_wager(ana, "A", RawAmount::Number(100.0))
            .await
        else {
            panic!("placement succeeds");
        };

        let Ok(summary) = harness.service.active_event_summary().await else {
            panic!("summary succeeds");
        };
        assert!((summary.gross_total - 100.0).abs() < 1e-9);
        assert!((summary.net_pool - 95.0).abs() < 1e-9);
        assert_eq!(summary.totals.len(), 2);
        let Some(total_b) = summary.totals.iter().find(|t| t.outcome == "B") else {
            panic!("unstaked outcomes are listed");
        };
        assert!(total_b.total.abs() < f64::EPSILON);

        let Ok(estimate) = harness
            .service
            .estimate_return("B", RawAmount::Number(100.0))
            .await
        else {
            panic!("estimate succeeds");
        };
        // 100 on B of a 200 gross pool: full net pool 190 comes back.
        assert!((estimate - 190.0).abs() < 1e-9);

        let unknown = harness
            .service
            .estimate_return("C", RawAmount::Number(100.0))
            .await;
        assert!(matches!(unknown, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn promote_and_demote() {
        let harness = make_harness().await;
        let root = add_user(&harness, "Root", true, true).await;
        let ana = add_user(&harness, "Ana", false, false).await;

        let Ok(promoted) = harness.service.promote_user(root, ana).await else {
            panic!("promotion succeeds");
        };
        assert!(promoted.is_admin);

        let Ok(demoted) = harness.service.demote_user(root, ana).await else {
            panic!("demotion succeeds");
        };
        assert!(!demoted.is_admin);

        // Admins cannot promote.
        let admin = add_user(&harness, "Admin", true, false).await;
        let result = harness.service.promote_user(admin, ana).await;
        assert!(matches!(result, Err(CoreError::Permission(_))));

        // Superadmin targets are untouchable.
        let other_root = add_user(&harness, "Other", false, true).await;
        let result = harness.service.demote_user(root, other_root).await;
        assert!(matches!(result, Err(CoreError::Permission(_))));
    }

    #[tokio::test]
    async fn list_users_requires_superadmin() {
        let harness = make_harness().await;
        let root = add_user(&harness, "Root", false, true).await;
        let admin = add_user(&harness, "Admin", true, false).await;

        let result = harness.service.list_users(admin).await;
        assert!(matches!(result, Err(CoreError::Permission(_))));

        let Ok(all) = harness.service.list_users(root).await else {
            panic!("superadmin lists users");
        };
        assert_eq!(all.len(), 2);
    }
}
