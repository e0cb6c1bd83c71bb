//! Server setup and initialization
//!
//! Provides the main application builder, the server runner and the
//! background sync loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use roster_cache::CacheService;
use roster_client::RosterClient;
use roster_common::{AppConfig, AppError, RetryPolicy};
use roster_db::{create_pool, PgExternalCharacterRepository, PgMemberRepository};
use roster_service::{ExternalCharacterService, GuildService, ServiceContextBuilder};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router, &state.config().cors);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = roster_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create the remote source client
    let source = Arc::new(
        RosterClient::new(&config.remote).map_err(|e| AppError::Config(e.to_string()))?,
    );

    // Create repositories and the cache tiers
    let member_repo = Arc::new(PgMemberRepository::new(pool.clone()));
    let external_repo = Arc::new(PgExternalCharacterRepository::new(pool.clone()));
    let cache = Arc::new(CacheService::new(config.cache));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .member_repo(member_repo)
        .external_repo(external_repo)
        .source(source)
        .cache(cache)
        .retry(RetryPolicy::contention())
        .guild_name(config.remote.guild_name.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Spawn the background sync loop, if enabled
///
/// Every tick refreshes the guild snapshot; every `external_every`-th tick
/// also refreshes the tracked external characters. Failures are logged and
/// the loop keeps running.
pub fn spawn_background_sync(state: &AppState) -> Option<tokio::task::JoinHandle<()>> {
    let interval_secs = state.config().sync.interval_secs?;
    let external_every = state.config().sync.external_every.max(1);
    let state = state.clone();

    info!(
        interval_secs,
        external_every, "Starting background sync loop"
    );

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            interval.tick().await;
            tick += 1;

            let ctx = state.service_context();
            if let Err(e) = GuildService::new(ctx).force_refresh().await {
                error!(error = %e, "Background roster refresh failed");
            }

            if tick % u64::from(external_every) == 0 {
                match ExternalCharacterService::new(ctx).sync().await {
                    Ok(outcome) => {
                        info!(
                            synced = outcome.synced,
                            failed = outcome.failed,
                            "Background external sync finished"
                        );
                    }
                    Err(e) => error!(error = %e, "Background external sync failed"),
                }
            }
        }
    }))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Kick off background polling before serving traffic
    let _sync_task = spawn_background_sync(&state);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
