//! Cache service - the four cache tiers and their invalidation groups
//!
//! Constructed once at process start with TTLs from configuration and shared
//! by handle; consumers never reach for ambient cache state.

use std::time::Duration;

use roster_common::CacheConfig;
use roster_core::{CombinedAnalysis, ExternalCharacter, Guild, GuildAnalysis};

use crate::ttl::{CacheStats, TtlCache};

/// Key for the latest reconciled guild snapshot
pub const GUILD_DATA_KEY: &str = "guild-data";
/// Key for the derived full analysis
pub const ANALYSIS_KEY: &str = "full-analysis";
/// Key for the external character roster
pub const EXTERNAL_CHARACTERS_KEY: &str = "external-characters";
/// Key for the combined guild + external analysis
pub const COMBINED_KEY: &str = "combined-analysis";

/// The tiered cache: raw snapshot, analysis, external list, combined
#[derive(Debug)]
pub struct CacheService {
    raw_snapshot: TtlCache<Guild>,
    analysis: TtlCache<GuildAnalysis>,
    external_characters: TtlCache<Vec<ExternalCharacter>>,
    combined: TtlCache<CombinedAnalysis>,
}

impl CacheService {
    /// Create all tiers with TTLs from configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            raw_snapshot: TtlCache::new(
                "raw-snapshot",
                Duration::from_secs(config.raw_snapshot_ttl_secs),
            ),
            analysis: TtlCache::new("analysis", Duration::from_secs(config.analysis_ttl_secs)),
            external_characters: TtlCache::new(
                "external-characters",
                Duration::from_secs(config.external_ttl_secs),
            ),
            combined: TtlCache::new("combined", Duration::from_secs(config.combined_ttl_secs)),
        }
    }

    /// Raw snapshot tier (60s default) - expires purely on schedule,
    /// never flushed by mutations
    pub fn raw_snapshot(&self) -> &TtlCache<Guild> {
        &self.raw_snapshot
    }

    /// Analysis tier (15s default)
    pub fn analysis(&self) -> &TtlCache<GuildAnalysis> {
        &self.analysis
    }

    /// External character list tier (30s default)
    pub fn external_characters(&self) -> &TtlCache<Vec<ExternalCharacter>> {
        &self.external_characters
    }

    /// Combined analysis tier (15s default)
    pub fn combined(&self) -> &TtlCache<CombinedAnalysis> {
        &self.combined
    }

    /// Flush the tiers affected by a member mutation (mark/unmark exited)
    pub fn invalidate_member_views(&self) {
        self.analysis.flush();
        self.combined.flush();
    }

    /// Flush the tiers affected by an external character mutation
    pub fn invalidate_external_views(&self) {
        self.external_characters.flush();
        self.combined.flush();
    }

    /// Flush every tier (force refresh)
    pub fn flush_all(&self) {
        self.raw_snapshot.flush();
        self.analysis.flush();
        self.external_characters.flush();
        self.combined.flush();
    }

    /// Statistics for every tier
    pub fn stats(&self) -> Vec<CacheStats> {
        vec![
            self.raw_snapshot.stats(),
            self.analysis.stats(),
            self.external_characters.stats(),
            self.combined.stats(),
        ]
    }
}
