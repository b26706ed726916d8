//! User registration, login and self-service endpoints.

use axum::extract::State;
use std::sync::Arc;

use super::error::{ApiResponse, ApiResult};
use super::extract::{JsonBody, PathId};
use super::validation::{validate_create_user, validate_login, validate_update_user};
use crate::auth::Identity;
use crate::db::{CreateUserRequest, LoginRequest, UpdateUserRequest, UserResponse};
use crate::AppState;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> ApiResult<UserResponse> {
    validate_create_user(&req)?;
    let user = state.users.add_user(req).await?;
    Ok(ApiResponse::created(user))
}

/// Responds with the bearer token as `data`
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<String> {
    validate_login(&req)?;
    let token = state.users.login(req).await?;
    Ok(ApiResponse::success(token))
}

pub async fn list_users(
    identity: Identity,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<UserResponse>> {
    let users = state.users.list_users(&identity).await?;
    Ok(ApiResponse::success(users))
}

pub async fn get_user(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> ApiResult<UserResponse> {
    let user = state.users.get_user(&identity, id).await?;
    Ok(ApiResponse::success(user))
}

pub async fn update_user(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    validate_update_user(&req)?;
    let user = state.users.update_user(&identity, id, req).await?;
    Ok(ApiResponse::success(user))
}

pub async fn delete_user(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> ApiResult<()> {
    state.users.delete_user(&identity, id).await?;
    Ok(ApiResponse::success(()))
}
