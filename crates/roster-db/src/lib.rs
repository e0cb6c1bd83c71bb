//! # roster-db
//!
//! PostgreSQL persistence layer.
//!
//! Implements the repository ports from `roster-core` over sqlx: the member
//! store (batched transactional upserts with message cleanup) and the
//! external character store. Transactional contention (serialization
//! failure, deadlock) is surfaced as [`roster_core::DomainError::Contention`]
//! so callers can retry with backoff.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, DatabaseConfig};
pub use repositories::{PgExternalCharacterRepository, PgMemberRepository};

// Re-export for consumers that need the pool type
pub use sqlx::PgPool;
