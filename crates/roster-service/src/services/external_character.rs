//! External character service
//!
//! Tracking of characters outside the guild: explicit add/remove, the cached
//! list and combined view, and the paced sync loop that refreshes tracked
//! characters against the remote source without hammering it.

use std::time::Duration;

use futures::future::join_all;
use tracing::{info, instrument, warn};

use roster_cache::{COMBINED_KEY, EXTERNAL_CHARACTERS_KEY};
use roster_core::entities::{ExternalCharacter, NAME_MAX_LEN};
use roster_core::{combined_analysis, CombinedAnalysis, DomainError};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::guild::GuildService;

/// Characters fetched concurrently per sync batch
const SYNC_BATCH_SIZE: usize = 3;
/// Stagger between request starts inside one batch
const SYNC_STAGGER: Duration = Duration::from_millis(1000);
/// Pause between consecutive batches
const SYNC_BATCH_PAUSE: Duration = Duration::from_millis(2000);

/// Outcome of one sync pass over the tracked characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub synced: usize,
    pub failed: usize,
}

/// External character service
pub struct ExternalCharacterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ExternalCharacterService<'a> {
    /// Create a new ExternalCharacterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start tracking a character
    ///
    /// Validation and the duplicate check run before any remote call, so an
    /// invalid request never costs a fetch. The character's current state is
    /// fetched once at add time; subsequent refreshes happen via
    /// [`sync`](Self::sync).
    #[instrument(skip(self))]
    pub async fn add(&self, name: &str) -> ServiceResult<ExternalCharacter> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName.into());
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(DomainError::NameTooLong { max: NAME_MAX_LEN }.into());
        }
        if self.ctx.external_repo().find_by_name(name).await?.is_some() {
            return Err(DomainError::AlreadyTracked(name.to_string()).into());
        }

        let remote = self.ctx.source().fetch_character(name).await?;
        let character = ExternalCharacter::new(
            remote.name,
            remote.level,
            remote.vocation,
            remote.status,
            remote.last_seen,
        );

        self.ctx.external_repo().create(&character).await?;
        self.ctx.cache().invalidate_external_views();
        info!(character = %character.name, "External character tracked");

        Ok(character)
    }

    /// Stop tracking a character
    #[instrument(skip(self))]
    pub async fn remove(&self, name: &str) -> ServiceResult<()> {
        self.ctx.external_repo().delete(name).await?;
        self.ctx.cache().invalidate_external_views();
        info!(character = %name, "External character untracked");
        Ok(())
    }

    /// Mark a tracked character as exited
    #[instrument(skip(self))]
    pub async fn mark_exited(&self, name: &str) -> ServiceResult<()> {
        self.ctx.external_repo().set_exited(name, true).await?;
        self.ctx.cache().invalidate_external_views();
        Ok(())
    }

    /// Clear a tracked character's exited flag
    #[instrument(skip(self))]
    pub async fn unmark_exited(&self, name: &str) -> ServiceResult<()> {
        self.ctx.external_repo().set_exited(name, false).await?;
        self.ctx.cache().invalidate_external_views();
        Ok(())
    }

    /// List the tracked characters, cached
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ExternalCharacter>> {
        if let Some(characters) = self
            .ctx
            .cache()
            .external_characters()
            .get(EXTERNAL_CHARACTERS_KEY)
        {
            return Ok(characters);
        }

        let characters = self.ctx.external_repo().find_all().await?;
        self.ctx
            .cache()
            .external_characters()
            .set(EXTERNAL_CHARACTERS_KEY, characters.clone());

        Ok(characters)
    }

    /// Refresh every tracked character from the remote source
    ///
    /// Fetches run in small concurrent batches with staggered starts and a
    /// pause between batches to keep request pressure flat. A failed fetch is
    /// logged and skipped; one bad character never aborts the pass.
    #[instrument(skip(self))]
    pub async fn sync(&self) -> ServiceResult<SyncOutcome> {
        let characters = self.ctx.external_repo().find_all().await?;
        if characters.is_empty() {
            return Ok(SyncOutcome {
                synced: 0,
                failed: 0,
            });
        }

        let mut synced = 0;
        let mut failed = 0;

        let batches: Vec<_> = characters.chunks(SYNC_BATCH_SIZE).collect();
        let last = batches.len() - 1;

        for (batch_idx, batch) in batches.into_iter().enumerate() {
            let results = join_all(batch.iter().enumerate().map(|(i, character)| async move {
                tokio::time::sleep(SYNC_STAGGER * i as u32).await;
                let remote = self.ctx.source().fetch_character(&character.name).await?;
                self.ctx
                    .external_repo()
                    .update_sync_data(
                        &character.name,
                        remote.level,
                        &remote.vocation,
                        remote.status,
                        remote.last_seen,
                    )
                    .await?;
                Ok::<_, super::error::ServiceError>(())
            }))
            .await;

            for (result, character) in results.into_iter().zip(batch) {
                match result {
                    Ok(()) => synced += 1,
                    Err(err) => {
                        warn!(character = %character.name, error = %err, "Sync failed, skipping");
                        failed += 1;
                    }
                }
            }

            if batch_idx < last {
                tokio::time::sleep(SYNC_BATCH_PAUSE).await;
            }
        }

        self.ctx.cache().invalidate_external_views();
        info!(synced, failed, "External character sync finished");

        Ok(SyncOutcome { synced, failed })
    }

    /// Get the combined guild + external analysis, cached
    #[instrument(skip(self))]
    pub async fn combined(&self) -> ServiceResult<CombinedAnalysis> {
        if let Some(combined) = self.ctx.cache().combined().get(COMBINED_KEY) {
            return Ok(combined);
        }

        let analysis = GuildService::new(self.ctx).get_analysis().await?;
        let characters = self.list().await?;
        let combined = combined_analysis(analysis, characters);
        self.ctx.cache().combined().set(COMBINED_KEY, combined.clone());

        Ok(combined)
    }
}
