use axum::{
    extract::{Path, State},
    Extension,
};
use chrono::{Datelike, Utc};
use tracing::{debug, info};

use crate::app::AppState;
use crate::database::models::{Budget, BudgetInput, Month};
use crate::database::store::BUDGET_PERIOD_TAKEN;
use crate::error::{ApiError, JsonBody};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::utils::{owned, parse_id, require_body_owner, require_self};

const NOT_FOUND: &str = "Budget not found";

/// GET /budgets/:userId - newest year first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Budget>> {
    let user_id = require_self(&user, &user_id)?;
    let budgets = state.store.list_budgets(user_id).await?;
    debug!("Found {} budgets for {}", budgets.len(), user_id);
    Ok(ApiResponse::success("SUCCESS", budgets))
}

/// GET /budgets/single/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Budget> {
    let id = parse_id(&id)?;
    let budget = owned(state.store.get_budget(id).await?, |b| b.user_id, &user, NOT_FOUND)?;
    Ok(ApiResponse::success("SUCCESS", budget))
}

/// GET /budgets/:userId/:month/:year
pub async fn by_month(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((user_id, month, year)): Path<(String, String, String)>,
) -> ApiResult<Budget> {
    let user_id = require_self(&user, &user_id)?;
    let month: Month = month
        .parse()
        .map_err(|e| ApiError::validation(format!("Budget validation failed: month: {}", e)))?;
    let year: i32 = year.parse().map_err(|_| {
        ApiError::validation(format!(
            "Budget validation failed: year: Cast to Number failed for value \"{}\"",
            year
        ))
    })?;

    let budget = state
        .store
        .find_budget(user_id, month, year)
        .await?
        .ok_or_else(|| ApiError::not_found("Budget not found for this month"))?;
    Ok(ApiResponse::success("SUCCESS", budget))
}

/// POST /budgets
///
/// Fails with 400 when the caller already has a budget for the period. The
/// lookup here only short-circuits the common case; the store's unique
/// constraint decides, and reports the same message.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(input): JsonBody<BudgetInput>,
) -> ApiResult<Budget> {
    require_body_owner(&user, input.user_id)?;

    if let Some(month) = input.month.as_deref().and_then(|m| m.parse::<Month>().ok()) {
        let year = input.year.unwrap_or_else(|| Utc::now().year());
        if state.store.find_budget(user.id, month, year).await?.is_some() {
            return Err(ApiError::conflict(BUDGET_PERIOD_TAKEN));
        }
    }

    let budget = state.store.insert_budget(user.id, input).await?;
    info!("Budget {} {} {} created for {}", budget.id, budget.month, budget.year, user.id);
    Ok(ApiResponse::created("Budget created successfully", budget))
}

/// PUT /budgets/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<BudgetInput>,
) -> ApiResult<Budget> {
    let id = parse_id(&id)?;
    require_body_owner(&user, patch.user_id)?;
    owned(state.store.get_budget(id).await?, |b| b.user_id, &user, NOT_FOUND)?;

    let budget = state
        .store
        .update_budget(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success("Budget updated successfully", budget))
}

/// DELETE /budgets/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Budget> {
    let id = parse_id(&id)?;
    owned(state.store.get_budget(id).await?, |b| b.user_id, &user, NOT_FOUND)?;

    let budget = state
        .store
        .delete_budget(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success("Budget deleted successfully", budget))
}
