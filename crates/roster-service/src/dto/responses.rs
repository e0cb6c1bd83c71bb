//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;

use roster_cache::CacheStats;
use roster_core::entities::MemberMessage;

/// One member's message list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListResponse {
    pub member_name: String,
    pub messages: Vec<MemberMessage>,
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            timestamp: Utc::now(),
        }
    }
}

/// Readiness response with dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

impl ReadinessResponse {
    pub fn new(database: bool, cache: Vec<CacheStats>) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            timestamp: Utc::now(),
            checks: HealthChecks { database, cache },
        }
    }
}

/// Individual subsystem checks for the readiness endpoint
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub cache: Vec<CacheStats>,
}
