//! Wire types for the remote roster API
//!
//! The remote payloads are decoded into these structs and converted to the
//! domain types at the boundary. A missing or mistyped field rejects the
//! whole response; an unrecognized member status is a decode error, not a
//! default.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use roster_core::traits::{RemoteGuild, RemoteMember, SourceError};
use roster_core::MemberStatus;

/// `GET /guild/{name}` response envelope
#[derive(Debug, Deserialize)]
pub struct GuildResponse {
    pub guild: GuildPayload,
}

#[derive(Debug, Deserialize)]
pub struct GuildPayload {
    pub name: String,
    pub players_online: i32,
    pub players_offline: i32,
    pub members_total: i32,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
}

#[derive(Debug, Deserialize)]
pub struct MemberPayload {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: String,
}

impl TryFrom<GuildResponse> for RemoteGuild {
    type Error = SourceError;

    fn try_from(response: GuildResponse) -> Result<Self, Self::Error> {
        let guild = response.guild;
        let members = guild
            .members
            .into_iter()
            .map(|m| {
                let status = MemberStatus::from_str(&m.status).map_err(SourceError::Decode)?;
                Ok(RemoteMember {
                    name: m.name,
                    level: m.level,
                    vocation: m.vocation,
                    status,
                })
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        Ok(RemoteGuild {
            name: guild.name,
            players_online: guild.players_online,
            players_offline: guild.players_offline,
            members_total: guild.members_total,
            members,
        })
    }
}

/// `GET /character/{name}` response envelope
#[derive(Debug, Deserialize)]
pub struct CharacterResponse {
    pub character: CharacterEnvelope,
    pub information: Information,
}

#[derive(Debug, Deserialize)]
pub struct CharacterEnvelope {
    pub character: CharacterPayload,
    #[serde(default)]
    pub other_characters: Vec<OtherCharacter>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterPayload {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Sibling character entry carrying the live status per world
#[derive(Debug, Deserialize)]
pub struct OtherCharacter {
    pub name: String,
    pub world: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct Information {
    pub status: InformationStatus,
}

#[derive(Debug, Deserialize)]
pub struct InformationStatus {
    pub http_code: u16,
}

impl CharacterResponse {
    /// Resolve the character's live status on the given world
    ///
    /// The character endpoint does not carry a status field directly; the
    /// live status comes from the `other_characters` entry matching the
    /// character's name and world. No match means offline.
    pub fn resolve_status(&self, world: &str) -> MemberStatus {
        self.character
            .other_characters
            .iter()
            .find(|c| c.name == self.character.character.name && c.world == world)
            .and_then(|c| MemberStatus::from_str(&c.status).ok())
            .unwrap_or(MemberStatus::Offline)
    }

    /// Parse the last login timestamp, treating empty values as absent
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.character
            .character
            .last_login
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}
