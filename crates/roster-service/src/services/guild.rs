//! Guild service
//!
//! Cached read path for the reconciled roster and its derived analysis, plus
//! the member-level mutations (exited flag, messages).

use tracing::{info, instrument, warn};

use roster_cache::{ANALYSIS_KEY, GUILD_DATA_KEY};
use roster_core::entities::{Guild, MemberMessage, MESSAGE_MAX_LEN};
use roster_core::{full_analysis, DomainError, GuildAnalysis};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reconciler::Reconciler;

/// Guild service
pub struct GuildService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildService<'a> {
    /// Create a new GuildService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current reconciled guild snapshot
    ///
    /// Serves from the raw snapshot tier while fresh; otherwise fetches,
    /// reconciles and re-populates the cache. If the remote fetch fails and
    /// an expired snapshot is still held, that stale snapshot is served
    /// instead of the error. This fallback exists only on this path; derived
    /// views are recomputed from whatever this returns.
    #[instrument(skip(self), fields(guild = %self.ctx.guild_name()))]
    pub async fn get_guild_data(&self) -> ServiceResult<Guild> {
        if let Some(guild) = self.ctx.cache().raw_snapshot().get(GUILD_DATA_KEY) {
            return Ok(guild);
        }

        let snapshot = match self.ctx.source().fetch_guild().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if let Some(stale) = self.ctx.cache().raw_snapshot().get_stale(GUILD_DATA_KEY) {
                    warn!(error = %err, "Remote fetch failed, serving stale snapshot");
                    return Ok(stale);
                }
                return Err(err.into());
            }
        };

        let guild = Reconciler::new(self.ctx).reconcile(&snapshot).await?;
        self.ctx
            .cache()
            .raw_snapshot()
            .set(GUILD_DATA_KEY, guild.clone());

        Ok(guild)
    }

    /// Flush every cache tier and rebuild the snapshot from the remote source
    #[instrument(skip(self))]
    pub async fn force_refresh(&self) -> ServiceResult<Guild> {
        self.ctx.cache().flush_all();
        info!("Cache flushed, forcing refresh");
        self.get_guild_data().await
    }

    /// Get the derived analysis of the current snapshot
    #[instrument(skip(self))]
    pub async fn get_analysis(&self) -> ServiceResult<GuildAnalysis> {
        if let Some(analysis) = self.ctx.cache().analysis().get(ANALYSIS_KEY) {
            return Ok(analysis);
        }

        let guild = self.get_guild_data().await?;
        let analysis = full_analysis(&guild);
        self.ctx.cache().analysis().set(ANALYSIS_KEY, analysis.clone());

        Ok(analysis)
    }

    /// Mark a member as exited
    #[instrument(skip(self))]
    pub async fn mark_exited(&self, name: &str) -> ServiceResult<()> {
        self.ctx.member_repo().set_exited(name, true).await?;
        self.ctx.cache().invalidate_member_views();
        info!(member = %name, "Member marked exited");
        Ok(())
    }

    /// Clear a member's exited flag
    #[instrument(skip(self))]
    pub async fn unmark_exited(&self, name: &str) -> ServiceResult<()> {
        self.ctx.member_repo().set_exited(name, false).await?;
        self.ctx.cache().invalidate_member_views();
        info!(member = %name, "Member exited flag cleared");
        Ok(())
    }

    /// Attach a free-text message to a member
    #[instrument(skip(self, message))]
    pub async fn add_message(&self, name: &str, message: &str) -> ServiceResult<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ServiceError::validation("message must not be empty"));
        }
        if message.chars().count() > MESSAGE_MAX_LEN {
            return Err(DomainError::MessageTooLong {
                max: MESSAGE_MAX_LEN,
            }
            .into());
        }

        self.ctx.member_repo().add_message(name, message).await?;
        Ok(())
    }

    /// List a member's messages
    #[instrument(skip(self))]
    pub async fn messages(&self, name: &str) -> ServiceResult<Vec<MemberMessage>> {
        self.ctx
            .member_repo()
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", name))?;

        Ok(self.ctx.member_repo().messages(name).await?)
    }
}
