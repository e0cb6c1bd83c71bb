//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Start tracking an external character
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrackCharacterRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
}

/// Attach a message to a guild member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMessageRequest {
    #[validate(length(min = 1, max = 50, message = "Message must be 1-50 characters"))]
    pub message: String,
}
