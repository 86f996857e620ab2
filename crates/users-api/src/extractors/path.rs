//! Path parameter extractors
//!
//! Type-safe extraction of user ids from path parameters. The raw segment
//! is kept as a string so a non-numeric id can be reported as a 400 with
//! the error envelope instead of a bare rejection.

use users_core::UserId;

use crate::response::ApiError;

/// Path parameters with user_id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as UserId
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}
