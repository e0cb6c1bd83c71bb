//! # roster-common
//!
//! Shared utilities: configuration, error handling, the generic retry
//! policy, and telemetry setup.

pub mod config;
pub mod error;
pub mod retry;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, CacheConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RemoteApiConfig, ServerConfig, SyncConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use retry::RetryPolicy;
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
