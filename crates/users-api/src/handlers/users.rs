//! User handlers
//!
//! Endpoints for the user resource: create, list, get, update, delete.

use axum::{
    extract::{Path, State},
    Json,
};
use users_service::{
    ApiResponse, CreateUserRequest, DeleteResponse, UpdateUserRequest, UserResponse, UserService,
};

use crate::extractors::{UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a new user
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<ApiResponse<UserResponse>>>> {
    let service = UserService::new(state.service_context());
    let user = service.create_user(request).await?;
    Ok(Created(Json(ApiResponse::new(user))))
}

/// List all users
///
/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let service = UserService::new(state.service_context());
    let users = service.list_users().await?;
    Ok(Json(ApiResponse::new(users)))
}

/// Get a user by ID
///
/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let user = service.get_user(user_id).await?;
    Ok(Json(ApiResponse::new(user)))
}

/// Update a user
///
/// PUT /api/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let user = service.update_user(user_id, request).await?;
    Ok(Json(ApiResponse::new(user)))
}

/// Delete a user
///
/// DELETE /api/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<DeleteResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    service.delete_user(user_id).await?;
    Ok(Json(DeleteResponse::user_deleted()))
}
