//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("External character not found: {0}")]
    CharacterNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Character name must not be empty")]
    EmptyName,

    #[error("Character name too long: max {max} characters")]
    NameTooLong { max: usize },

    #[error("Message too long: max {max} characters")]
    MessageTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Character is already being tracked: {0}")]
    AlreadyTracked(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    /// Transactional conflict (serialization failure or deadlock).
    /// Retryable with backoff; escalated after max attempts.
    #[error("Transactional contention: {0}")]
    Contention(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::CharacterNotFound(_) => "UNKNOWN_CHARACTER",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyName => "EMPTY_NAME",
            Self::NameTooLong { .. } => "NAME_TOO_LONG",
            Self::MessageTooLong { .. } => "MESSAGE_TOO_LONG",
            Self::AlreadyTracked(_) => "ALREADY_TRACKED",
            Self::Contention(_) => "CONTENTION",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_) | Self::CharacterNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyName
                | Self::NameTooLong { .. }
                | Self::MessageTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyTracked(_))
    }

    /// Check if the operation may be retried
    ///
    /// Only transactional contention qualifies; plain database failures do not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Contention(_))
    }
}
