//! Remote roster source port
//!
//! The remote API is an external collaborator: this trait defines the two
//! lookups the domain needs (full guild snapshot, single character) and the
//! error taxonomy the rest of the system distinguishes on. The concrete HTTP
//! client lives in `roster-client`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entities::MemberStatus;

/// Errors from the remote roster source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The fetch exceeded its deadline. Reported distinctly from a generic
    /// fetch failure.
    #[error("Remote request timed out")]
    Timeout,

    #[error("Remote source returned status {0}")]
    Status(u16),

    #[error("Remote request failed: {0}")]
    Request(String),

    /// The response did not match the expected shape. The whole response is
    /// rejected rather than propagating a partial object.
    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Character not found: {0}")]
    NotFound(String),
}

impl SourceError {
    /// Check if this is the timeout class of failure
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// One member as reported by the remote snapshot (no local state attached)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMember {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: MemberStatus,
}

/// Full guild snapshot as of one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteGuild {
    pub name: String,
    pub players_online: i32,
    pub players_offline: i32,
    pub members_total: i32,
    pub members: Vec<RemoteMember>,
}

/// One character as resolved from the remote character endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCharacter {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: MemberStatus,
    pub last_seen: Option<DateTime<Utc>>,
}

// ============================================================================
// Roster Source
// ============================================================================

#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetch the configured guild's full roster snapshot
    async fn fetch_guild(&self) -> SourceResult<RemoteGuild>;

    /// Fetch a single character's current state
    async fn fetch_character(&self, name: &str) -> SourceResult<RemoteCharacter>;
}
