//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use users_core::UserChanges;
use validator::Validate;

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 255, message = "Password must be 1-255 characters"))]
    pub password: String,
}

/// Update user request
///
/// Every field is optional; a field submitted as an empty string counts as
/// absent rather than as a validation failure. Because of that rule the
/// per-field constraints are checked in the service layer after
/// normalization, not here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Normalize into a domain change set, dropping empty-string fields
    pub fn into_changes(self) -> UserChanges {
        UserChanges {
            email: self.email.filter(|s| !s.is_empty()),
            username: self.username.filter(|s| !s.is_empty()),
            password: self.password.filter(|s| !s.is_empty()),
        }
    }
}
