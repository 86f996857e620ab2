//! User entity <-> model mapper

use users_core::entities::User;
use users_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            email: model.email,
            username: model.username,
            password: model.password,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
