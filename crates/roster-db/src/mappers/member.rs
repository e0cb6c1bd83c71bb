//! Member entity <-> model mapper

use std::str::FromStr;

use roster_core::entities::{GuildMember, MemberMessage, MemberStatus};
use roster_core::error::DomainError;
use roster_core::traits::RepoResult;

use crate::models::{MemberMessageModel, MemberModel};

/// Convert a MemberModel row to a GuildMember entity
///
/// The status column only ever holds values this service wrote; an
/// unparseable value means the row is corrupt and is reported as a database
/// error rather than silently defaulted.
pub fn member_from_model(model: MemberModel) -> RepoResult<GuildMember> {
    let status = MemberStatus::from_str(&model.status)
        .map_err(|e| DomainError::DatabaseError(format!("Corrupt status for {}: {e}", model.name)))?;

    Ok(GuildMember {
        name: model.name,
        level: model.level,
        vocation: model.vocation,
        status,
        last_seen: model.last_seen,
        is_exited: model.is_exited,
    })
}

/// Convert a MemberMessageModel row to a MemberMessage entity
pub fn message_from_model(model: MemberMessageModel) -> MemberMessage {
    MemberMessage {
        member_name: model.member_name,
        message: model.message,
        created_at: model.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_from_model() {
        let model = MemberModel {
            name: "Aldur".to_string(),
            level: 523,
            vocation: "Elder Druid".to_string(),
            status: "online".to_string(),
            last_seen: None,
            is_exited: false,
        };

        let member = member_from_model(model).unwrap();
        assert_eq!(member.name, "Aldur");
        assert_eq!(member.status, MemberStatus::Online);
    }

    #[test]
    fn test_corrupt_status_is_an_error() {
        let model = MemberModel {
            name: "Aldur".to_string(),
            level: 523,
            vocation: "Elder Druid".to_string(),
            status: "banished".to_string(),
            last_seen: None,
            is_exited: false,
        };

        assert!(member_from_model(model).is_err());
    }
}
