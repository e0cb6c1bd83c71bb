//! Error handling utilities for repositories

use roster_core::error::DomainError;
use sqlx::Error as SqlxError;

/// SQLSTATE for serialization failure
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE for deadlock detected
const DEADLOCK_DETECTED: &str = "40P01";
/// SQLSTATE for unique violation
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Convert a SQLx error to a DomainError
///
/// Serialization failures and deadlocks map to the retryable
/// [`DomainError::Contention`] class; everything else is a plain database
/// error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let SqlxError::Database(db_err) = &e {
        if let Some(code) = db_err.code() {
            if code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED {
                return DomainError::Contention(db_err.to_string());
            }
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return the given error, else map normally
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let SqlxError::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Check for foreign key violation and return the given error, else map normally
pub fn map_fk_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let SqlxError::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return on_fk();
        }
    }
    map_db_error(e)
}
