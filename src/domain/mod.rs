//! Domain layer: entities, value objects, and pure services.
//!
//! This module holds everything with real invariants: the stake and
//! fee value types, the event state machine, the immutable wager
//! record, the permission decision table, and the prize engine. None
//! of it touches the persistence layer; orchestration lives in
//! [`crate::service`].

pub mod event;
pub mod event_id;
pub mod fee;
pub mod money;
pub mod permissions;
pub mod prize;
pub mod user;
pub mod wager;

pub use event::{EventStatus, WagerEvent};
pub use event_id::EventId;
pub use fee::PlatformFee;
pub use money::Money;
pub use user::{Role, User};
pub use wager::Wager;
