use axum::{
    extract::{Path, State},
    Extension,
};
use tracing::debug;

use crate::app::AppState;
use crate::database::models::{Goal, GoalInput};
use crate::error::{ApiError, JsonBody};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::utils::{owned, parse_id, require_body_owner, require_self};

const NOT_FOUND: &str = "Goal not found";

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Goal>> {
    let user_id = require_self(&user, &user_id)?;
    let goals = state.store.list_goals(user_id).await?;
    debug!("Found {} goals for {}", goals.len(), user_id);
    Ok(ApiResponse::success("SUCCESS", goals))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Goal> {
    let id = parse_id(&id)?;
    let goal = owned(state.store.get_goal(id).await?, |g| g.user_id, &user, NOT_FOUND)?;
    Ok(ApiResponse::success("SUCCESS", goal))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(input): JsonBody<GoalInput>,
) -> ApiResult<Goal> {
    require_body_owner(&user, input.user_id)?;
    let goal = state.store.insert_goal(user.id, input).await?;
    debug!("Goal {} created for {}", goal.id, user.id);
    Ok(ApiResponse::created("Goal created successfully", goal))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<GoalInput>,
) -> ApiResult<Goal> {
    let id = parse_id(&id)?;
    require_body_owner(&user, patch.user_id)?;
    owned(state.store.get_goal(id).await?, |g| g.user_id, &user, NOT_FOUND)?;

    let goal = state
        .store
        .update_goal(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success("Goal updated successfully", goal))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Goal> {
    let id = parse_id(&id)?;
    owned(state.store.get_goal(id).await?, |g| g.user_id, &user, NOT_FOUND)?;

    let goal = state
        .store
        .delete_goal(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success("Goal deleted successfully", goal))
}
