//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the persistent member store;
//! the infrastructure layer provides the implementation. The store is treated
//! as an opaque transactional key-value store keyed by character name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ExternalCharacter, GuildMember, MemberMessage, MemberStatus};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// One computed member update, applied as part of a batch transaction
///
/// `last_seen` carries the already-resolved value (the reconciler applies the
/// transition rules before the write). `clear_messages` queues deletion of the
/// member's annotations inside the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberUpsert {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: MemberStatus,
    pub last_seen: Option<DateTime<Utc>>,
    pub is_exited: bool,
    pub clear_messages: bool,
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Load the full set of persisted members
    async fn find_all(&self) -> RepoResult<Vec<GuildMember>>;

    /// Find a member by name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<GuildMember>>;

    /// Apply a batch of member updates as a single atomic transaction
    ///
    /// Insert-or-update keyed by name. Message deletions queued on the batch
    /// entries run inside the same transaction. May fail with
    /// [`DomainError::Contention`] on lock conflict.
    async fn upsert_batch(&self, batch: &[MemberUpsert]) -> RepoResult<()>;

    /// Clear the exited flag for the given members
    async fn clear_exited(&self, names: &[String]) -> RepoResult<()>;

    /// Set or clear the exited flag for one member
    async fn set_exited(&self, name: &str, exited: bool) -> RepoResult<()>;

    /// Attach a free-text message to a member
    async fn add_message(&self, name: &str, message: &str) -> RepoResult<()>;

    /// List a member's messages
    async fn messages(&self, name: &str) -> RepoResult<Vec<MemberMessage>>;
}

// ============================================================================
// External Character Repository
// ============================================================================

#[async_trait]
pub trait ExternalCharacterRepository: Send + Sync {
    /// List all tracked external characters, ordered by name
    async fn find_all(&self) -> RepoResult<Vec<ExternalCharacter>>;

    /// Find a tracked character by name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ExternalCharacter>>;

    /// Start tracking a character
    async fn create(&self, character: &ExternalCharacter) -> RepoResult<()>;

    /// Stop tracking a character
    async fn delete(&self, name: &str) -> RepoResult<()>;

    /// Overwrite the synced fields (level, vocation, status, last seen)
    async fn update_sync_data(
        &self,
        name: &str,
        level: i32,
        vocation: &str,
        status: MemberStatus,
        last_seen: Option<DateTime<Utc>>,
    ) -> RepoResult<()>;

    /// Set or clear the exited flag
    async fn set_exited(&self, name: &str, exited: bool) -> RepoResult<()>;
}
