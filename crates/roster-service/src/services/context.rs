//! Service context - dependency container for services
//!
//! Holds the repositories, the remote source, the cache tiers and the retry
//! policy. Everything is injected at construction; services never reach for
//! ambient state.

use std::sync::Arc;

use roster_cache::CacheService;
use roster_common::RetryPolicy;
use roster_core::traits::{ExternalCharacterRepository, MemberRepository, RosterSource};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - The member and external character repositories
/// - The remote roster source
/// - The tiered cache
/// - The retry policy applied to contended persistence writes
#[derive(Clone)]
pub struct ServiceContext {
    member_repo: Arc<dyn MemberRepository>,
    external_repo: Arc<dyn ExternalCharacterRepository>,
    source: Arc<dyn RosterSource>,
    cache: Arc<CacheService>,
    retry: RetryPolicy,
    guild_name: String,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        external_repo: Arc<dyn ExternalCharacterRepository>,
        source: Arc<dyn RosterSource>,
        cache: Arc<CacheService>,
        retry: RetryPolicy,
        guild_name: impl Into<String>,
    ) -> Self {
        Self {
            member_repo,
            external_repo,
            source,
            cache,
            retry,
            guild_name: guild_name.into(),
        }
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the external character repository
    pub fn external_repo(&self) -> &dyn ExternalCharacterRepository {
        self.external_repo.as_ref()
    }

    /// Get the remote roster source
    pub fn source(&self) -> &dyn RosterSource {
        self.source.as_ref()
    }

    /// Get the cache service
    pub fn cache(&self) -> &CacheService {
        &self.cache
    }

    /// Get the retry policy for contended persistence writes
    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Name of the tracked guild
    pub fn guild_name(&self) -> &str {
        &self.guild_name
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("guild_name", &self.guild_name)
            .field("retry", &self.retry)
            .field("repositories", &"...")
            .field("cache", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    external_repo: Option<Arc<dyn ExternalCharacterRepository>>,
    source: Option<Arc<dyn RosterSource>>,
    cache: Option<Arc<CacheService>>,
    retry: RetryPolicy,
    guild_name: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            member_repo: None,
            external_repo: None,
            source: None,
            cache: None,
            retry: RetryPolicy::contention(),
            guild_name: None,
        }
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn external_repo(mut self, repo: Arc<dyn ExternalCharacterRepository>) -> Self {
        self.external_repo = Some(repo);
        self
    }

    pub fn source(mut self, source: Arc<dyn RosterSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn cache(mut self, cache: Arc<CacheService>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn guild_name(mut self, name: impl Into<String>) -> Self {
        self.guild_name = Some(name.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.external_repo
                .ok_or_else(|| ServiceError::validation("external_repo is required"))?,
            self.source
                .ok_or_else(|| ServiceError::validation("source is required"))?,
            self.cache
                .ok_or_else(|| ServiceError::validation("cache is required"))?,
            self.retry,
            self.guild_name
                .ok_or_else(|| ServiceError::validation("guild_name is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
