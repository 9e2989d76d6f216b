//! Service layer: the settlement orchestrator.
//!
//! [`SettlementService`] coordinates permission checks, pure domain
//! transitions, prize computation, and repository persistence.

pub mod settlement;

pub use settlement::SettlementService;
