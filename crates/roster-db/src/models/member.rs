//! Member database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the guild_members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub status: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub is_exited: bool,
}

/// Database model for the member_messages table
#[derive(Debug, Clone, FromRow)]
pub struct MemberMessageModel {
    pub member_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
