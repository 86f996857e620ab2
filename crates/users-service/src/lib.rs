//! # users-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    ApiResponse, CreateUserRequest, DeleteResponse, HealthChecks, HealthResponse,
    ReadinessResponse, ServiceBanner, UpdateUserRequest, UserResponse,
};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService};
