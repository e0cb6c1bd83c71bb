//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use roster_common::AppError;
use roster_core::traits::source::SourceError;
use roster_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Remote source failure
    Source(SourceError),

    /// Resource not found
    NotFound { resource: &'static str, name: String },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Source(e) => write!(f, "{e}"),
            Self::NotFound { resource, name } => write!(f, "{resource} not found: {name}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            name: name.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::Source(e) => match e {
                SourceError::Timeout => 504,
                SourceError::NotFound(_) => 404,
                _ => 502,
            },
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Source(e) => match e {
                SourceError::Timeout => "REMOTE_TIMEOUT",
                SourceError::NotFound(_) => "UNKNOWN_CHARACTER",
                _ => "REMOTE_FETCH_ERROR",
            },
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<SourceError> for ServiceError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Source(SourceError::Timeout) => AppError::RemoteTimeout,
            ServiceError::Source(SourceError::NotFound(name)) => {
                AppError::NotFound(format!("Character {name}"))
            }
            ServiceError::Source(e) => AppError::RemoteFetch(e.to_string()),
            ServiceError::NotFound { resource, name } => {
                AppError::NotFound(format!("{resource} {name}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Member", "Aldur");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Member not found: Aldur"));
    }

    #[test]
    fn test_timeout_maps_to_504() {
        let err = ServiceError::Source(SourceError::Timeout);
        assert_eq!(err.status_code(), 504);
        assert_eq!(err.error_code(), "REMOTE_TIMEOUT");

        let app_err: AppError = err.into();
        assert_eq!(app_err.status_code(), 504);
    }

    #[test]
    fn test_generic_source_failure_maps_to_502() {
        let err = ServiceError::Source(SourceError::Status(500));
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.error_code(), "REMOTE_FETCH_ERROR");
    }

    #[test]
    fn test_domain_conflict_maps_to_409() {
        let err = ServiceError::Domain(DomainError::AlreadyTracked("Nessa".to_string()));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_TRACKED");
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("name must not be empty");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_convert_to_app_error() {
        let service_err = ServiceError::not_found("Character", "Nessa");
        let app_err: AppError = service_err.into();
        assert_eq!(app_err.status_code(), 404);
    }
}
