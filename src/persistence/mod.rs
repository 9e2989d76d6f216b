//! Persistence layer: repository contracts and PostgreSQL backends.
//!
//! The domain consumes the traits in [`repository`]; [`postgres`]
//! implements them over `sqlx::PgPool`. Schema lives in `migrations/`,
//! including the partial unique index that enforces the single
//! active event at the storage level.

pub mod models;
pub mod postgres;
pub mod repository;

pub use repository::{EventRepository, UserRepository, WagerRepository};
