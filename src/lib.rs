//! # bolao-gateway
//!
//! REST API gateway and settlement core for a pari-mutuel wagering
//! pool ("bolão"). Users stake money on one outcome of the single
//! active event; when the event is resolved, the pooled stakes minus
//! the platform fee are redistributed to the winners in proportion to
//! their stake.
//!
//! The domain layer carries all the real invariants: money must
//! balance, exactly one event is active, only closed events resolve,
//! superadmins never wager. HTTP is a thin layer mapping 1:1 onto the
//! settlement service's operations.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SettlementService (service/)
//!     │
//!     ├── Domain core (domain/)
//!     │     money · fee · event state machine · wager
//!     │     permission policy · prize engine
//!     │
//!     └── Repository contracts (persistence/)
//!           PostgreSQL via sqlx
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
