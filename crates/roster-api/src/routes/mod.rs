//! Route definitions
//!
//! All API routes organized by domain and mounted under /api. Mutation
//! routes and the external character surface require the API key (enforced
//! by the [`RequireApiKey`](crate::extractors::RequireApiKey) extractor in
//! their handlers).

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{external, guild, health};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(guild_routes())
        .merge(external_routes())
}

/// Guild roster routes
fn guild_routes() -> Router<AppState> {
    Router::new()
        .route("/guild/data", get(guild::get_guild_data))
        .route("/guild/force-refresh", get(guild::force_refresh))
        .route("/guild/health", get(guild::cache_health))
        .route("/guild/mark-exited/:name", post(guild::mark_exited))
        .route("/guild/unmark-exited/:name", post(guild::unmark_exited))
        .route(
            "/guild/members/:name/messages",
            get(guild::get_messages).post(guild::add_message),
        )
}

/// External character routes (all keyed)
fn external_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/external/characters",
            get(external::list_characters).post(external::track_character),
        )
        .route(
            "/external/characters/:name",
            delete(external::untrack_character),
        )
        .route(
            "/external/characters/:name/mark-exited",
            post(external::mark_exited),
        )
        .route(
            "/external/characters/:name/unmark-exited",
            post(external::unmark_exited),
        )
        .route("/external/sync", post(external::sync))
        .route("/external/combined-data", get(external::combined_data))
}
