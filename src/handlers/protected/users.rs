use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Deserialize;
use tracing::info;

use crate::app::AppState;
use crate::database::models::User;
use crate::error::{ApiError, JsonBody};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::utils::require_self;

const NOT_FOUND: &str = "User not found";

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// GET /users/:id - the caller's own profile
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<User> {
    let id = require_self(&user, &id)?;
    let profile = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success("SUCCESS", profile))
}

/// PUT /users - rename the caller
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> ApiResult<User> {
    let name = body.name.as_deref().unwrap_or_default();
    if name.trim().is_empty() {
        return Err(ApiError::validation("User validation failed: name: Name is required"));
    }

    let profile = state
        .store
        .rename_user(user.id, name)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    info!("User {} renamed", user.id);
    Ok(ApiResponse::success("User updated successfully", profile))
}
