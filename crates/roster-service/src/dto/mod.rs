//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::{AddMessageRequest, TrackCharacterRequest};
pub use responses::{HealthChecks, HealthResponse, MessageListResponse, ReadinessResponse};
