//! # roster-cache
//!
//! Tiered in-process caching for derived roster data.
//!
//! Four independently-expiring key/value caches sit in front of expensive
//! recomputation: the raw guild snapshot, the derived analysis, the external
//! character list, and the combined analysis. Each tier has its own fixed TTL
//! injected at construction; mutations flush the tiers whose content they
//! could have affected. The cache is advisory - a miss always falls back to
//! recomputation from the source of truth.

pub mod service;
pub mod ttl;

pub use service::{
    CacheService, ANALYSIS_KEY, COMBINED_KEY, EXTERNAL_CHARACTERS_KEY, GUILD_DATA_KEY,
};
pub use ttl::{CacheStats, TtlCache};
