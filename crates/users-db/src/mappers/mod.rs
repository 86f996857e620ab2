//! Entity to model mappers
//!
//! This module provides conversions between the domain entity (users-core)
//! and the database model: `From<Model> for Entity` converts database rows
//! to domain objects.

mod user;
