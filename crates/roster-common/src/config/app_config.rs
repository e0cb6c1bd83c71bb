//! Application configuration structs
//!
//! Loads configuration from environment variables.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub remote: RemoteApiConfig,
    pub cache: CacheConfig,
    pub sync: SyncConfig,
    pub cors: CorsConfig,
    /// Static key gating the mutation endpoints
    pub api_key: String,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Remote roster API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteApiConfig {
    #[serde(default = "default_remote_base_url")]
    pub base_url: String,
    /// Name of the tracked guild
    pub guild_name: String,
    /// Game world used to resolve character status
    #[serde(default = "default_world")]
    pub world: String,
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

/// Per-tier cache TTLs (seconds)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_raw_snapshot_ttl")]
    pub raw_snapshot_ttl_secs: u64,
    #[serde(default = "default_analysis_ttl")]
    pub analysis_ttl_secs: u64,
    #[serde(default = "default_external_ttl")]
    pub external_ttl_secs: u64,
    #[serde(default = "default_combined_ttl")]
    pub combined_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            raw_snapshot_ttl_secs: default_raw_snapshot_ttl(),
            analysis_ttl_secs: default_analysis_ttl(),
            external_ttl_secs: default_external_ttl(),
            combined_ttl_secs: default_combined_ttl(),
        }
    }
}

/// Background sync configuration
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct SyncConfig {
    /// Interval between background roster refreshes. Disabled when unset.
    pub interval_secs: Option<u64>,
    /// Refresh external characters every Nth roster tick
    #[serde(default = "default_external_every")]
    pub external_every: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "roster-tracker".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_remote_base_url() -> String {
    "https://api.tibiadata.com/v4".to_string()
}

fn default_world() -> String {
    "Penumbra".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    10
}

fn default_raw_snapshot_ttl() -> u64 {
    60
}

fn default_analysis_ttl() -> u64 {
    15
}

fn default_external_ttl() -> u64 {
    30
}

fn default_combined_ttl() -> u64 {
    15
}

fn default_external_every() -> u32 {
    4
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("SERVER_PORT")?
                    .ok_or(ConfigError::MissingVar("SERVER_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            remote: RemoteApiConfig {
                base_url: env::var("REMOTE_API_URL").unwrap_or_else(|_| default_remote_base_url()),
                guild_name: env::var("GUILD_NAME").map_err(|_| ConfigError::MissingVar("GUILD_NAME"))?,
                world: env::var("GUILD_WORLD").unwrap_or_else(|_| default_world()),
                timeout_secs: parse_var("REMOTE_TIMEOUT_SECS")?
                    .unwrap_or_else(default_remote_timeout_secs),
            },
            cache: CacheConfig {
                raw_snapshot_ttl_secs: parse_var("CACHE_RAW_TTL_SECS")?
                    .unwrap_or_else(default_raw_snapshot_ttl),
                analysis_ttl_secs: parse_var("CACHE_ANALYSIS_TTL_SECS")?
                    .unwrap_or_else(default_analysis_ttl),
                external_ttl_secs: parse_var("CACHE_EXTERNAL_TTL_SECS")?
                    .unwrap_or_else(default_external_ttl),
                combined_ttl_secs: parse_var("CACHE_COMBINED_TTL_SECS")?
                    .unwrap_or_else(default_combined_ttl),
            },
            sync: SyncConfig {
                interval_secs: parse_var("SYNC_INTERVAL_SECS")?,
                external_every: parse_var("SYNC_EXTERNAL_EVERY")?
                    .unwrap_or_else(default_external_every),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            api_key: env::var("API_KEY").map_err(|_| ConfigError::MissingVar("API_KEY"))?,
        })
    }
}

/// Parse an optional numeric environment variable
///
/// Unset is fine; a set but unparsable value is a hard error so a typo in
/// the environment does not silently fall back to a default.
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
