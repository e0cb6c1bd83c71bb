//! # roster-core
//!
//! Domain layer for the guild roster tracker.
//!
//! Contains the domain entities (guild, members, external characters), the
//! pure analysis engine that derives grouped/sorted views from a reconciled
//! member list, domain errors, and the repository/source traits implemented
//! by the infrastructure crates.

pub mod analysis;
pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types
pub use analysis::{
    combined_analysis, filter_online, full_analysis, group_by_vocation, sort_by_level_desc,
    split_by_level, CombinedAnalysis, CombinedTotals, GuildAnalysis, GuildInfo, LevelSplit,
    VocationGroup, LEVEL_THRESHOLD,
};
pub use entities::{ExternalCharacter, Guild, GuildMember, MemberMessage, MemberStatus};
pub use error::DomainError;
pub use traits::{
    ExternalCharacterRepository, MemberRepository, MemberUpsert, RepoResult, RosterSource,
};
