//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Track-character request body
#[derive(Debug, Serialize)]
pub struct TrackRequest {
    pub name: String,
}

impl TrackRequest {
    /// A name no character on the remote world plausibly carries
    pub fn nonexistent() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("zz no such character {suffix}"),
        }
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Add-message request body
#[derive(Debug, Serialize)]
pub struct MessageRequest {
    pub message: String,
}

impl MessageRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            message: format!("integration note {suffix}"),
        }
    }

    pub fn of(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Error envelope returned by the API
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail inside the envelope
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Cache tier stats as returned by /api/guild/health
#[derive(Debug, Deserialize)]
pub struct CacheTierStats {
    pub name: String,
    pub ttl_secs: u64,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}
