//! External character database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the external_characters table
#[derive(Debug, Clone, FromRow)]
pub struct ExternalCharacterModel {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub is_exited: bool,
    pub is_external: bool,
    pub updated_at: DateTime<Utc>,
}
