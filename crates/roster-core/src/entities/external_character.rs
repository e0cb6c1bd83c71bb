//! External character entity - a manually tracked character outside the guild

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::member::{GuildMember, MemberStatus};

/// Maximum length of a tracked character name
pub const NAME_MAX_LEN: usize = 50;

/// Externally tracked character
///
/// Created by explicit operator action, removed by explicit action, and
/// synced against the remote source on its own schedule - never as part of
/// the main guild sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCharacter {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: MemberStatus,
    pub last_seen: Option<DateTime<Utc>>,
    pub is_exited: bool,
    pub is_external: bool,
    pub updated_at: DateTime<Utc>,
}

impl ExternalCharacter {
    /// Create a new external character from freshly fetched data
    pub fn new(
        name: impl Into<String>,
        level: i32,
        vocation: impl Into<String>,
        status: MemberStatus,
        last_seen: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            vocation: vocation.into(),
            status,
            last_seen,
            is_exited: false,
            is_external: true,
            updated_at: Utc::now(),
        }
    }

    /// View this character as a guild member for combined analysis
    pub fn as_member(&self) -> GuildMember {
        GuildMember {
            name: self.name.clone(),
            level: self.level,
            vocation: self.vocation.clone(),
            status: self.status,
            last_seen: self.last_seen,
            is_exited: self.is_exited,
        }
    }
}
