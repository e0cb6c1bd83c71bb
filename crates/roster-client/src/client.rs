//! HTTP implementation of the roster source port

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tracing::{debug, instrument};

use roster_common::RemoteApiConfig;
use roster_core::traits::{
    RemoteCharacter, RemoteGuild, RosterSource, SourceError, SourceResult,
};

use crate::wire::{CharacterResponse, GuildResponse};

/// HTTP client for the remote roster API
#[derive(Debug, Clone)]
pub struct RosterClient {
    http: reqwest::Client,
    base_url: Url,
    guild_name: String,
    world: String,
}

impl RosterClient {
    /// Create a client from configuration
    ///
    /// The configured timeout applies to the whole request; an elapsed
    /// deadline surfaces as [`SourceError::Timeout`].
    pub fn new(config: &RemoteApiConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SourceError::Request(format!("Invalid base URL: {e}")))?;

        Ok(Self {
            http,
            base_url,
            guild_name: config.guild_name.clone(),
            world: config.world.clone(),
        })
    }

    /// Build an endpoint URL with percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> SourceResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| SourceError::Request("Base URL cannot be a base".to_string()))?;
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

fn map_request_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Request(err.to_string())
    }
}

#[async_trait]
impl RosterSource for RosterClient {
    #[instrument(skip(self), fields(guild = %self.guild_name))]
    async fn fetch_guild(&self) -> SourceResult<RemoteGuild> {
        let url = self.endpoint(&["guild", &self.guild_name])?;
        let response = self.http.get(url).send().await.map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: GuildResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        let guild = RemoteGuild::try_from(payload)?;
        debug!(members = guild.members.len(), "Fetched guild snapshot");
        Ok(guild)
    }

    #[instrument(skip(self))]
    async fn fetch_character(&self, name: &str) -> SourceResult<RemoteCharacter> {
        let url = self.endpoint(&["character", name])?;
        let response = self.http.get(url).send().await.map_err(map_request_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: CharacterResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        // The remote wraps its own status code inside the envelope
        if payload.information.status.http_code == 404 {
            return Err(SourceError::NotFound(name.to_string()));
        }

        let resolved_status = payload.resolve_status(&self.world);
        let last_seen = payload.last_seen();
        let character = payload.character.character;

        Ok(RemoteCharacter {
            name: character.name,
            level: character.level,
            vocation: character.vocation,
            status: resolved_status,
            last_seen,
        })
    }
}
