//! In-memory doubles for service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use roster_cache::CacheService;
use roster_common::{CacheConfig, RetryPolicy};
use roster_core::entities::{ExternalCharacter, GuildMember, MemberMessage, MemberStatus};
use roster_core::traits::{
    ExternalCharacterRepository, MemberRepository, MemberUpsert, RemoteCharacter, RemoteGuild,
    RemoteMember, RepoResult, RosterSource, SourceError, SourceResult,
};
use roster_core::DomainError;

use super::context::{ServiceContext, ServiceContextBuilder};

/// In-memory member store
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<HashMap<String, GuildMember>>,
    messages: Mutex<HashMap<String, Vec<MemberMessage>>>,
    contention_failures: AtomicU32,
}

impl InMemoryMemberRepository {
    pub fn all(&self) -> Vec<GuildMember> {
        let mut members: Vec<_> = self.members.lock().values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }

    pub fn get(&self, name: &str) -> Option<GuildMember> {
        self.members.lock().get(name).cloned()
    }

    /// Make the next `n` batch writes fail with contention
    pub fn fail_with_contention(&self, n: u32) {
        self.contention_failures.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_all(&self) -> RepoResult<Vec<GuildMember>> {
        Ok(self.all())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<GuildMember>> {
        Ok(self.get(name))
    }

    async fn upsert_batch(&self, batch: &[MemberUpsert]) -> RepoResult<()> {
        let remaining = self.contention_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.contention_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(DomainError::Contention("simulated deadlock".to_string()));
        }

        let mut members = self.members.lock();
        let mut messages = self.messages.lock();
        for upsert in batch {
            members.insert(
                upsert.name.clone(),
                GuildMember {
                    name: upsert.name.clone(),
                    level: upsert.level,
                    vocation: upsert.vocation.clone(),
                    status: upsert.status,
                    last_seen: upsert.last_seen,
                    is_exited: upsert.is_exited,
                },
            );
            if upsert.clear_messages {
                messages.remove(&upsert.name);
            }
        }
        Ok(())
    }

    async fn clear_exited(&self, names: &[String]) -> RepoResult<()> {
        let mut members = self.members.lock();
        for name in names {
            if let Some(member) = members.get_mut(name) {
                member.is_exited = false;
            }
        }
        Ok(())
    }

    async fn set_exited(&self, name: &str, exited: bool) -> RepoResult<()> {
        let mut members = self.members.lock();
        match members.get_mut(name) {
            Some(member) => {
                member.is_exited = exited;
                Ok(())
            }
            None => Err(DomainError::MemberNotFound(name.to_string())),
        }
    }

    async fn add_message(&self, name: &str, message: &str) -> RepoResult<()> {
        if !self.members.lock().contains_key(name) {
            return Err(DomainError::MemberNotFound(name.to_string()));
        }
        self.messages
            .lock()
            .entry(name.to_string())
            .or_default()
            .push(MemberMessage {
                member_name: name.to_string(),
                message: message.to_string(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn messages(&self, name: &str) -> RepoResult<Vec<MemberMessage>> {
        Ok(self.messages.lock().get(name).cloned().unwrap_or_default())
    }
}

/// In-memory external character store
#[derive(Default)]
pub struct InMemoryExternalCharacterRepository {
    characters: Mutex<HashMap<String, ExternalCharacter>>,
}

impl InMemoryExternalCharacterRepository {
    pub fn get(&self, name: &str) -> Option<ExternalCharacter> {
        self.characters.lock().get(name).cloned()
    }
}

#[async_trait]
impl ExternalCharacterRepository for InMemoryExternalCharacterRepository {
    async fn find_all(&self) -> RepoResult<Vec<ExternalCharacter>> {
        let mut characters: Vec<_> = self.characters.lock().values().cloned().collect();
        characters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(characters)
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ExternalCharacter>> {
        Ok(self.get(name))
    }

    async fn create(&self, character: &ExternalCharacter) -> RepoResult<()> {
        let mut characters = self.characters.lock();
        if characters.contains_key(&character.name) {
            return Err(DomainError::AlreadyTracked(character.name.clone()));
        }
        characters.insert(character.name.clone(), character.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> RepoResult<()> {
        self.characters
            .lock()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DomainError::CharacterNotFound(name.to_string()))
    }

    async fn update_sync_data(
        &self,
        name: &str,
        level: i32,
        vocation: &str,
        status: MemberStatus,
        last_seen: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        let mut characters = self.characters.lock();
        match characters.get_mut(name) {
            Some(character) => {
                character.level = level;
                character.vocation = vocation.to_string();
                character.status = status;
                character.last_seen = last_seen;
                character.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::CharacterNotFound(name.to_string())),
        }
    }

    async fn set_exited(&self, name: &str, exited: bool) -> RepoResult<()> {
        let mut characters = self.characters.lock();
        match characters.get_mut(name) {
            Some(character) => {
                character.is_exited = exited;
                Ok(())
            }
            None => Err(DomainError::CharacterNotFound(name.to_string())),
        }
    }
}

/// Scripted remote source
#[derive(Default)]
pub struct FakeSource {
    guild: Mutex<Option<RemoteGuild>>,
    characters: Mutex<HashMap<String, RemoteCharacter>>,
    fail_next: Mutex<Option<SourceError>>,
    character_fetches: AtomicU32,
}

impl FakeSource {
    pub fn set_guild(&self, guild: RemoteGuild) {
        *self.guild.lock() = Some(guild);
    }

    pub fn add_character(&self, character: RemoteCharacter) {
        self.characters
            .lock()
            .insert(character.name.clone(), character);
    }

    pub fn remove_character(&self, name: &str) {
        self.characters.lock().remove(name);
    }

    /// Fail the next fetch (guild or character) with the given error
    pub fn fail_next(&self, error: SourceError) {
        *self.fail_next.lock() = Some(error);
    }

    pub fn character_fetches(&self) -> u32 {
        self.character_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RosterSource for FakeSource {
    async fn fetch_guild(&self) -> SourceResult<RemoteGuild> {
        if let Some(error) = self.fail_next.lock().take() {
            return Err(error);
        }
        self.guild
            .lock()
            .clone()
            .ok_or_else(|| SourceError::Request("no guild configured".to_string()))
    }

    async fn fetch_character(&self, name: &str) -> SourceResult<RemoteCharacter> {
        self.character_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fail_next.lock().take() {
            return Err(error);
        }
        self.characters
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }
}

/// Assembled context with handles to every double
pub struct TestContext {
    pub member_repo: Arc<InMemoryMemberRepository>,
    pub external_repo: Arc<InMemoryExternalCharacterRepository>,
    pub source: Arc<FakeSource>,
    pub cache: Arc<CacheService>,
    ctx: ServiceContext,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_cache_config(CacheConfig::default())
    }

    pub fn with_cache_config(config: CacheConfig) -> Self {
        let member_repo = Arc::new(InMemoryMemberRepository::default());
        let external_repo = Arc::new(InMemoryExternalCharacterRepository::default());
        let source = Arc::new(FakeSource::default());
        let cache = Arc::new(CacheService::new(config));

        let ctx = ServiceContextBuilder::new()
            .member_repo(member_repo.clone())
            .external_repo(external_repo.clone())
            .source(source.clone())
            .cache(cache.clone())
            .retry(RetryPolicy::new(
                3,
                Duration::from_millis(1),
                Duration::from_millis(2),
            ))
            .guild_name("Felizes")
            .build()
            .unwrap();

        Self {
            member_repo,
            external_repo,
            source,
            cache,
            ctx,
        }
    }

    pub fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }
}

/// One remote member
pub fn remote_member(name: &str, level: i32, vocation: &str, status: MemberStatus) -> RemoteMember {
    RemoteMember {
        name: name.to_string(),
        level,
        vocation: vocation.to_string(),
        status,
    }
}

/// A remote guild snapshot with aggregates derived from the member list
pub fn remote_guild(members: Vec<RemoteMember>) -> RemoteGuild {
    let online = members.iter().filter(|m| m.status.is_online()).count() as i32;
    let total = members.len() as i32;
    RemoteGuild {
        name: "Felizes".to_string(),
        players_online: online,
        players_offline: total - online,
        members_total: total,
        members,
    }
}

/// One remote character lookup result
pub fn remote_character(
    name: &str,
    level: i32,
    vocation: &str,
    status: MemberStatus,
) -> RemoteCharacter {
    RemoteCharacter {
        name: name.to_string(),
        level,
        vocation: vocation.to_string(),
        status,
        last_seen: status.is_online().then(Utc::now),
    }
}
