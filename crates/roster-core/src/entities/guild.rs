//! Guild entity - one full roster snapshot enriched with local state

use serde::{Deserialize, Serialize};

use super::member::GuildMember;

/// Guild snapshot
///
/// Transient: rebuilt from every remote fetch and never persisted as a unit.
/// The aggregate counts come from the remote payload and are authoritative
/// over anything derived by counting the (exited-filtered) member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub name: String,
    pub players_online: i32,
    pub players_offline: i32,
    pub members_total: i32,
    pub members: Vec<GuildMember>,
}

impl Guild {
    /// Create an empty guild snapshot
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players_online: 0,
            players_offline: 0,
            members_total: 0,
            members: Vec::new(),
        }
    }

    /// Find a member by name
    pub fn member(&self, name: &str) -> Option<&GuildMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::member::MemberStatus;

    #[test]
    fn test_empty_guild() {
        let guild = Guild::empty("Felizes");
        assert_eq!(guild.name, "Felizes");
        assert_eq!(guild.members_total, 0);
        assert!(guild.members.is_empty());
    }

    #[test]
    fn test_member_lookup() {
        let mut guild = Guild::empty("Felizes");
        guild
            .members
            .push(GuildMember::new("Aldur", 500, "Knight", MemberStatus::Online));

        assert!(guild.member("Aldur").is_some());
        assert!(guild.member("Nessa").is_none());
    }
}
