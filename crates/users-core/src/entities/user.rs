//! User entity - represents a registered user account

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User entity backed by a single row in the users table
///
/// `email` and `username` are globally unique. `created_at` is set once by
/// the store; `updated_at` is refreshed on every successful mutation, so
/// `created_at <= updated_at` holds for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with both timestamps set to the same instant
    pub fn new(id: UserId, email: String, username: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            username,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a change set, touching `updated_at` only when something changed
    pub fn apply(&mut self, changes: &UserChanges) -> bool {
        let mut changed = false;
        if let Some(email) = &changes.email {
            if *email != self.email {
                self.email = email.clone();
                changed = true;
            }
        }
        if let Some(username) = &changes.username {
            if *username != self.username {
                self.username = username.clone();
                changed = true;
            }
        }
        if let Some(password) = &changes.password {
            if *password != self.password {
                self.password = password.clone();
                changed = true;
            }
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Field values for a user that does not exist yet
///
/// `id` and both timestamps are assigned by the store at insert time.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Partial change set for an existing user
///
/// `None` means "leave the field untouched". Only `email`, `username` and
/// `password` are mutable; `id` and `created_at` never change.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    /// Check whether the change set carries any field at all
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.username.is_none() && self.password.is_none()
    }
}
