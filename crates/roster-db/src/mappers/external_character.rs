//! External character entity <-> model mapper

use std::str::FromStr;

use roster_core::entities::{ExternalCharacter, MemberStatus};
use roster_core::error::DomainError;
use roster_core::traits::RepoResult;

use crate::models::ExternalCharacterModel;

/// Convert an ExternalCharacterModel row to an ExternalCharacter entity
pub fn external_character_from_model(model: ExternalCharacterModel) -> RepoResult<ExternalCharacter> {
    let status = MemberStatus::from_str(&model.status)
        .map_err(|e| DomainError::DatabaseError(format!("Corrupt status for {}: {e}", model.name)))?;

    Ok(ExternalCharacter {
        name: model.name,
        level: model.level,
        vocation: model.vocation,
        status,
        last_seen: model.last_seen,
        is_exited: model.is_exited,
        is_external: model.is_external,
        updated_at: model.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_external_character_from_model() {
        let model = ExternalCharacterModel {
            name: "Nessa".to_string(),
            level: 312,
            vocation: "Royal Paladin".to_string(),
            status: "offline".to_string(),
            last_seen: None,
            is_exited: false,
            is_external: true,
            updated_at: Utc::now(),
        };

        let character = external_character_from_model(model).unwrap();
        assert_eq!(character.name, "Nessa");
        assert!(character.is_external);
        assert_eq!(character.status, MemberStatus::Offline);
    }
}
