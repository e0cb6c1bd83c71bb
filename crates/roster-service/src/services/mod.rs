//! Application services
//!
//! Orchestration of the domain operations: snapshot reconciliation, cached
//! guild views, and external character tracking.

pub mod context;
pub mod error;
pub mod external_character;
pub mod guild;
pub mod reconciler;

#[cfg(test)]
pub mod test_support;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use external_character::{ExternalCharacterService, SyncOutcome};
pub use guild::GuildService;
pub use reconciler::Reconciler;
