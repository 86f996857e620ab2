//! Repository implementations
//!
//! PostgreSQL implementation of the repository trait defined in users-core.

mod error;
mod user;

pub use user::PgUserRepository;
