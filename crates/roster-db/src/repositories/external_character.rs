//! PostgreSQL implementation of ExternalCharacterRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::{ExternalCharacter, MemberStatus};
use roster_core::error::DomainError;
use roster_core::traits::{ExternalCharacterRepository, RepoResult};

use crate::mappers::external_character_from_model;
use crate::models::ExternalCharacterModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ExternalCharacterRepository
#[derive(Clone)]
pub struct PgExternalCharacterRepository {
    pool: PgPool,
}

impl PgExternalCharacterRepository {
    /// Create a new PgExternalCharacterRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExternalCharacterRepository for PgExternalCharacterRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<ExternalCharacter>> {
        let models = sqlx::query_as::<_, ExternalCharacterModel>(
            r#"
            SELECT name, level, vocation, status, last_seen, is_exited, is_external, updated_at
            FROM external_characters
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(external_character_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ExternalCharacter>> {
        let model = sqlx::query_as::<_, ExternalCharacterModel>(
            r#"
            SELECT name, level, vocation, status, last_seen, is_exited, is_external, updated_at
            FROM external_characters
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model.map(external_character_from_model).transpose()
    }

    #[instrument(skip(self, character), fields(name = %character.name))]
    async fn create(&self, character: &ExternalCharacter) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO external_characters
                (name, level, vocation, status, last_seen, is_exited, is_external, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&character.name)
        .bind(character.level)
        .bind(&character.vocation)
        .bind(character.status.to_string())
        .bind(character.last_seen)
        .bind(character.is_exited)
        .bind(character.is_external)
        .bind(character.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::AlreadyTracked(character.name.clone()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, name: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM external_characters WHERE name = $1
            "#,
        )
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CharacterNotFound(name.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_sync_data(
        &self,
        name: &str,
        level: i32,
        vocation: &str,
        status: MemberStatus,
        last_seen: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE external_characters
            SET level = $2, vocation = $3, status = $4, last_seen = $5, updated_at = NOW()
            WHERE name = $1
            "#,
        )
        .bind(name)
        .bind(level)
        .bind(vocation)
        .bind(status.to_string())
        .bind(last_seen)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CharacterNotFound(name.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_exited(&self, name: &str, exited: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE external_characters SET is_exited = $2, updated_at = NOW() WHERE name = $1
            "#,
        )
        .bind(name)
        .bind(exited)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CharacterNotFound(name.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgExternalCharacterRepository>();
    }
}
