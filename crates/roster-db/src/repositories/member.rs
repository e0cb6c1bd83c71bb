//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::{GuildMember, MemberMessage};
use roster_core::error::DomainError;
use roster_core::traits::{MemberRepository, MemberUpsert, RepoResult};

use crate::mappers::{member_from_model, message_from_model};
use crate::models::{MemberMessageModel, MemberModel};

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<GuildMember>> {
        let models = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT name, level, vocation, status, last_seen, is_exited
            FROM guild_members
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(member_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<GuildMember>> {
        let model = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT name, level, vocation, status, last_seen, is_exited
            FROM guild_members
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model.map(member_from_model).transpose()
    }

    #[instrument(skip(self, batch), fields(batch_len = batch.len()))]
    async fn upsert_batch(&self, batch: &[MemberUpsert]) -> RepoResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for upsert in batch {
            sqlx::query(
                r#"
                INSERT INTO guild_members (name, level, vocation, status, last_seen, is_exited)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (name) DO UPDATE SET
                    level = EXCLUDED.level,
                    vocation = EXCLUDED.vocation,
                    status = EXCLUDED.status,
                    last_seen = EXCLUDED.last_seen,
                    is_exited = EXCLUDED.is_exited
                "#,
            )
            .bind(&upsert.name)
            .bind(upsert.level)
            .bind(&upsert.vocation)
            .bind(upsert.status.to_string())
            .bind(upsert.last_seen)
            .bind(upsert.is_exited)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            // Newly-offline members lose their annotations in the same
            // transaction as the status flip
            if upsert.clear_messages {
                sqlx::query(
                    r#"
                    DELETE FROM member_messages WHERE member_name = $1
                    "#,
                )
                .bind(&upsert.name)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, names), fields(count = names.len()))]
    async fn clear_exited(&self, names: &[String]) -> RepoResult<()> {
        if names.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            UPDATE guild_members SET is_exited = FALSE WHERE name = ANY($1)
            "#,
        )
        .bind(names)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_exited(&self, name: &str, exited: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE guild_members SET is_exited = $2 WHERE name = $1
            "#,
        )
        .bind(name)
        .bind(exited)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(name.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self, message))]
    async fn add_message(&self, name: &str, message: &str) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO member_messages (member_name, message, created_at)
            VALUES ($1, $2, NOW())
            "#,
        )
        .bind(name)
        .bind(message)
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::MemberNotFound(name.to_string())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn messages(&self, name: &str) -> RepoResult<Vec<MemberMessage>> {
        let models = sqlx::query_as::<_, MemberMessageModel>(
            r#"
            SELECT member_name, message, created_at
            FROM member_messages
            WHERE member_name = $1
            ORDER BY created_at
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(message_from_model).collect())
    }
}
