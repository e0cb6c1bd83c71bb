//! Guild member entity - one tracked character on the guild roster

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Online status of a member as reported by the remote snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Member is currently online
    Online,
    /// Member is offline
    Offline,
}

impl Default for MemberStatus {
    fn default() -> Self {
        Self::Offline
    }
}

impl MemberStatus {
    /// Check if this status counts as online
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

/// Guild member entity
///
/// Identity is the character name, which is stable across fetches. Level,
/// vocation and status are overwritten from every remote snapshot; `last_seen`
/// and `is_exited` are locally owned state layered on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildMember {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: MemberStatus,
    pub last_seen: Option<DateTime<Utc>>,
    pub is_exited: bool,
}

impl GuildMember {
    /// Create a new member as first observed on a snapshot
    pub fn new(name: impl Into<String>, level: i32, vocation: impl Into<String>, status: MemberStatus) -> Self {
        Self {
            name: name.into(),
            level,
            vocation: vocation.into(),
            status,
            last_seen: None,
            is_exited: false,
        }
    }

    /// Check if the member should appear in "active" views
    ///
    /// Exited members are excluded even while nominally online.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_online() && !self.is_exited
    }

    /// Mark the member as exited (locally owned flag)
    pub fn mark_exited(&mut self) {
        self.is_exited = true;
    }

    /// Clear the exited flag
    pub fn unmark_exited(&mut self) {
        self.is_exited = false;
    }
}

/// Free-text annotation attached to a member
///
/// Messages are deleted when the member transitions to offline so stale
/// annotations never outlive a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMessage {
    pub member_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Maximum length of a member message
pub const MESSAGE_MAX_LEN: usize = 50;
