//! Guild roster handlers
//!
//! The read endpoints serve the derived analysis; the mutation endpoints
//! flip the exited flag and manage member messages.

use axum::extract::{Path, State};

use roster_cache::CacheStats;
use roster_core::GuildAnalysis;
use roster_service::dto::{AddMessageRequest, MessageListResponse};
use roster_service::GuildService;

use crate::extractors::{RequireApiKey, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Get the full guild analysis
///
/// GET /api/guild/data
pub async fn get_guild_data(State(state): State<AppState>) -> ApiResult<ApiJson<GuildAnalysis>> {
    let analysis = GuildService::new(state.service_context())
        .get_analysis()
        .await?;
    Ok(ApiJson(analysis))
}

/// Flush every cache tier and return a freshly built analysis
///
/// GET /api/guild/force-refresh
pub async fn force_refresh(State(state): State<AppState>) -> ApiResult<ApiJson<GuildAnalysis>> {
    let service = GuildService::new(state.service_context());
    service.force_refresh().await?;
    Ok(ApiJson(service.get_analysis().await?))
}

/// Cache statistics for every tier
///
/// GET /api/guild/health
pub async fn cache_health(State(state): State<AppState>) -> ApiJson<Vec<CacheStats>> {
    ApiJson(state.service_context().cache().stats())
}

/// Mark a member as exited
///
/// POST /api/guild/mark-exited/:name
pub async fn mark_exited(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<NoContent> {
    GuildService::new(state.service_context())
        .mark_exited(&name)
        .await?;
    Ok(NoContent)
}

/// Clear a member's exited flag
///
/// POST /api/guild/unmark-exited/:name
pub async fn unmark_exited(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<NoContent> {
    GuildService::new(state.service_context())
        .unmark_exited(&name)
        .await?;
    Ok(NoContent)
}

/// List a member's messages
///
/// GET /api/guild/members/:name/messages
pub async fn get_messages(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<ApiJson<MessageListResponse>> {
    let messages = GuildService::new(state.service_context())
        .messages(&name)
        .await?;
    Ok(ApiJson(MessageListResponse {
        member_name: name,
        messages,
    }))
}

/// Attach a message to a member
///
/// POST /api/guild/members/:name/messages
pub async fn add_message(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedJson(body): ValidatedJson<AddMessageRequest>,
) -> ApiResult<Created<ApiJson<MessageListResponse>>> {
    let service = GuildService::new(state.service_context());
    service.add_message(&name, &body.message).await?;

    let messages = service.messages(&name).await?;
    Ok(Created(ApiJson(MessageListResponse {
        member_name: name,
        messages,
    })))
}
