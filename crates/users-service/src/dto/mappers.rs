//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use users_core::entities::User;

use super::responses::UserResponse;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: user.email.clone(),
            username: user.username.clone(),
            password: user.password.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
