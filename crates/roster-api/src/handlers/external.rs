//! External character handlers
//!
//! The whole external surface requires the API key.

use axum::extract::{Path, State};

use roster_core::entities::ExternalCharacter;
use roster_core::CombinedAnalysis;
use roster_service::dto::TrackCharacterRequest;
use roster_service::{ExternalCharacterService, SyncOutcome};

use crate::extractors::{RequireApiKey, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// List tracked external characters
///
/// GET /api/external/characters
pub async fn list_characters(
    _key: RequireApiKey,
    State(state): State<AppState>,
) -> ApiResult<ApiJson<Vec<ExternalCharacter>>> {
    let characters = ExternalCharacterService::new(state.service_context())
        .list()
        .await?;
    Ok(ApiJson(characters))
}

/// Start tracking a character
///
/// POST /api/external/characters
pub async fn track_character(
    _key: RequireApiKey,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<TrackCharacterRequest>,
) -> ApiResult<Created<ApiJson<ExternalCharacter>>> {
    let character = ExternalCharacterService::new(state.service_context())
        .add(&body.name)
        .await?;
    Ok(Created(ApiJson(character)))
}

/// Stop tracking a character
///
/// DELETE /api/external/characters/:name
pub async fn untrack_character(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<NoContent> {
    ExternalCharacterService::new(state.service_context())
        .remove(&name)
        .await?;
    Ok(NoContent)
}

/// Mark a tracked character as exited
///
/// POST /api/external/characters/:name/mark-exited
pub async fn mark_exited(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<NoContent> {
    ExternalCharacterService::new(state.service_context())
        .mark_exited(&name)
        .await?;
    Ok(NoContent)
}

/// Clear a tracked character's exited flag
///
/// POST /api/external/characters/:name/unmark-exited
pub async fn unmark_exited(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<NoContent> {
    ExternalCharacterService::new(state.service_context())
        .unmark_exited(&name)
        .await?;
    Ok(NoContent)
}

/// Refresh every tracked character from the remote source
///
/// POST /api/external/sync
pub async fn sync(
    _key: RequireApiKey,
    State(state): State<AppState>,
) -> ApiResult<ApiJson<SyncOutcome>> {
    let outcome = ExternalCharacterService::new(state.service_context())
        .sync()
        .await?;
    Ok(ApiJson(outcome))
}

/// Combined guild + external analysis
///
/// GET /api/external/combined-data
pub async fn combined_data(
    _key: RequireApiKey,
    State(state): State<AppState>,
) -> ApiResult<ApiJson<CombinedAnalysis>> {
    let combined = ExternalCharacterService::new(state.service_context())
        .combined()
        .await?;
    Ok(ApiJson(combined))
}
