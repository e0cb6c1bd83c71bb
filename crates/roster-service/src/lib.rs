//! # roster-service
//!
//! Application layer: orchestrates the remote source, the persistent member
//! store and the cache tiers into the operations the API exposes.
//!
//! The reconciler merges each remote snapshot with locally owned state
//! (exited flags, last-seen timestamps, messages) in transactional batches;
//! the guild and external character services layer caching, validation and
//! sync scheduling on top.

pub mod dto;
pub mod services;

pub use services::{
    ExternalCharacterService, GuildService, Reconciler, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SyncOutcome,
};
