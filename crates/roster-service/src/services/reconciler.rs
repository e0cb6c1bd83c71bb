//! Snapshot reconciler
//!
//! Merges a remote guild snapshot with the persisted member state. Remote
//! fields (level, vocation, status) always win; locally owned state (exited
//! flag, last-seen, messages) is carried or transitioned according to the
//! status change:
//!
//! - offline -> online, or first sighting while online: last-seen set to now
//! - online -> online: last-seen carried unchanged
//! - any -> offline: last-seen cleared and messages deleted
//!
//! Writes are applied in fixed-size batches, each batch one transaction,
//! retried with jittered backoff on transactional contention. Exited members
//! that vanish from the snapshot get their flag reset so a returning member
//! starts clean.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info, instrument};

use roster_core::entities::{Guild, GuildMember};
use roster_core::traits::{MemberUpsert, RemoteGuild};
use roster_core::DomainError;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Members written per transaction
const BATCH_SIZE: usize = 5;

/// Snapshot reconciler
pub struct Reconciler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Reconciler<'a> {
    /// Create a new Reconciler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reconcile one remote snapshot against the persisted state
    ///
    /// Returns the enriched guild: remote membership and aggregates, local
    /// exited flags and resolved last-seen values.
    #[instrument(skip(self, snapshot), fields(members = snapshot.members.len()))]
    pub async fn reconcile(&self, snapshot: &RemoteGuild) -> ServiceResult<Guild> {
        let persisted = self.ctx.member_repo().find_all().await?;
        let persisted: HashMap<String, GuildMember> =
            persisted.into_iter().map(|m| (m.name.clone(), m)).collect();

        self.reset_absent_exited(snapshot, &persisted).await?;

        let upserts = compute_upserts(snapshot, &persisted);

        for chunk in upserts.chunks(BATCH_SIZE) {
            self.ctx
                .retry()
                .run(DomainError::is_retryable, || {
                    self.ctx.member_repo().upsert_batch(chunk)
                })
                .await?;
        }

        info!(
            guild = %snapshot.name,
            members = upserts.len(),
            "Snapshot reconciled"
        );

        Ok(enriched_guild(snapshot, &upserts))
    }

    /// Reset the exited flag for members that dropped off the snapshot
    ///
    /// Absence is treated as having left the guild; if the character later
    /// rejoins it must not resurface pre-flagged.
    async fn reset_absent_exited(
        &self,
        snapshot: &RemoteGuild,
        persisted: &HashMap<String, GuildMember>,
    ) -> ServiceResult<()> {
        let absent: Vec<String> = persisted
            .values()
            .filter(|m| m.is_exited && snapshot.members.iter().all(|r| r.name != m.name))
            .map(|m| m.name.clone())
            .collect();

        if !absent.is_empty() {
            debug!(count = absent.len(), "Resetting exited flag for absent members");
            self.ctx.member_repo().clear_exited(&absent).await?;
        }

        Ok(())
    }
}

/// Compute the per-member writes for one snapshot
fn compute_upserts(
    snapshot: &RemoteGuild,
    persisted: &HashMap<String, GuildMember>,
) -> Vec<MemberUpsert> {
    let now = Utc::now();

    snapshot
        .members
        .iter()
        .map(|remote| {
            let existing = persisted.get(&remote.name);
            let is_exited = existing.is_some_and(|m| m.is_exited);

            let (last_seen, clear_messages) = if remote.status.is_online() {
                let was_online = existing.is_some_and(|m| m.status.is_online());
                let last_seen = if was_online {
                    existing.and_then(|m| m.last_seen)
                } else {
                    Some(now)
                };
                (last_seen, false)
            } else {
                (None, true)
            };

            MemberUpsert {
                name: remote.name.clone(),
                level: remote.level,
                vocation: remote.vocation.clone(),
                status: remote.status,
                last_seen,
                is_exited,
                clear_messages,
            }
        })
        .collect()
}

/// Build the post-reconciliation guild view from the computed writes
///
/// Aggregate counts come straight from the remote payload.
fn enriched_guild(snapshot: &RemoteGuild, upserts: &[MemberUpsert]) -> Guild {
    Guild {
        name: snapshot.name.clone(),
        players_online: snapshot.players_online,
        players_offline: snapshot.players_offline,
        members_total: snapshot.members_total,
        members: upserts
            .iter()
            .map(|u| GuildMember {
                name: u.name.clone(),
                level: u.level,
                vocation: u.vocation.clone(),
                status: u.status,
                last_seen: u.last_seen,
                is_exited: u.is_exited,
            })
            .collect(),
    }
}
