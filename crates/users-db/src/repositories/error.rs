//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use users_core::error::DomainError;
use users_core::value_objects::UserId;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique-constraint violation to the matching conflict error
///
/// The store constraint is the authoritative uniqueness guard; the
/// application-level pre-checks only exist for friendlier error ordering.
/// A violation that slips past the pre-check (concurrent writer) must
/// surface as the same conflict, never as a generic database error.
pub fn map_unique_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("users_username_key") => DomainError::UsernameTaken,
                _ => DomainError::EmailTaken,
            };
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}
