//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{NewUser, User, UserChanges};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// List all users, ascending by id
    async fn list_all(&self) -> RepoResult<Vec<User>>;

    /// Check if email is already taken, optionally excluding one user
    async fn email_taken(&self, email: &str, exclude: Option<UserId>) -> RepoResult<bool>;

    /// Check if username is already taken, optionally excluding one user
    async fn username_taken(&self, username: &str, exclude: Option<UserId>) -> RepoResult<bool>;

    /// Insert a new user and return the persisted record
    ///
    /// Runs the uniqueness pre-checks (email first, then username) and the
    /// insert in a single transaction. The store's unique constraints remain
    /// the authoritative guard; a constraint violation surfaces as the same
    /// conflict error as the pre-check.
    async fn insert(&self, new_user: &NewUser) -> RepoResult<User>;

    /// Apply a change set to an existing user and return the updated record
    ///
    /// Supplied fields are written and `updated_at` is refreshed by the
    /// store; `created_at` is never touched. Conflicts against *other* users
    /// are checked email first, then username, inside the same transaction
    /// as the update.
    async fn update(&self, id: UserId, changes: &UserChanges) -> RepoResult<User>;

    /// Permanently delete a user
    async fn delete(&self, id: UserId) -> RepoResult<()>;
}
