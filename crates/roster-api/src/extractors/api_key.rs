//! API key extractor
//!
//! Validates the static API key gating mutation endpoints.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Proof that the request carried the configured API key
///
/// The key is read from the `x-api-key` header, falling back to the
/// `api_key` query parameter. A missing key rejects with 401; a wrong key
/// with 403.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

#[async_trait]
impl<S> FromRequestParts<S> for RequireApiKey
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let provided = match from_header {
            Some(key) => Some(key),
            None => Query::<ApiKeyQuery>::from_request_parts(parts, state)
                .await
                .ok()
                .and_then(|Query(q)| q.api_key),
        };

        let app_state = AppState::from_ref(state);
        match provided {
            None => Err(ApiError::MissingApiKey),
            Some(key) if key != app_state.api_key() => {
                tracing::warn!("Rejected request with invalid API key");
                Err(ApiError::InvalidApiKey)
            }
            Some(_) => Ok(RequireApiKey),
        }
    }
}
