// handlers/protected/entries.rs - /incomes and /expenses
//
// Both resources share one set of handlers, parameterised by a marker type
// naming the entry kind.

use axum::{
    extract::{Path, State},
    Extension,
};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::app::AppState;
use crate::database::models::{Entry, EntryInput, EntryKind};
use crate::error::{ApiError, JsonBody};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::utils::{owned, parse_id, require_body_owner, require_self};

pub trait EntryResource: Send + Sync + 'static {
    const KIND: EntryKind;
}

pub struct Incomes;
pub struct Expenses;

impl EntryResource for Incomes {
    const KIND: EntryKind = EntryKind::Income;
}

impl EntryResource for Expenses {
    const KIND: EntryKind = EntryKind::Expense;
}

fn not_found(kind: EntryKind) -> String {
    format!("{} not found", kind.label())
}

/// GET /{incomes,expenses}/:userId
pub async fn list<R: EntryResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Entry>> {
    let user_id = require_self(&user, &user_id)?;
    let entries = state.store.list_entries(R::KIND, user_id).await?;
    debug!("Found {} {} entries for {}", entries.len(), R::KIND, user_id);
    Ok(ApiResponse::success("SUCCESS", entries))
}

/// GET /{incomes,expenses}/single/:id
pub async fn get<R: EntryResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Entry> {
    let id = parse_id(&id)?;
    let entry = state.store.get_entry(R::KIND, id).await?;
    let entry = owned(entry, |e| e.user_id, &user, &not_found(R::KIND))?;
    Ok(ApiResponse::success("SUCCESS", entry))
}

/// POST /{incomes,expenses}
pub async fn create<R: EntryResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(input): JsonBody<EntryInput>,
) -> ApiResult<Entry> {
    require_body_owner(&user, input.user_id)?;
    let entry = state.store.insert_entry(R::KIND, user.id, input).await?;
    debug!("{} {} created for {}", R::KIND.label(), entry.id, user.id);
    Ok(ApiResponse::created(
        format!("{} created successfully", R::KIND.label()),
        entry,
    ))
}

/// PUT /{incomes,expenses}/:id
pub async fn update<R: EntryResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<EntryInput>,
) -> ApiResult<Entry> {
    let id = parse_id(&id)?;
    require_body_owner(&user, patch.user_id)?;
    owned(
        state.store.get_entry(R::KIND, id).await?,
        |e| e.user_id,
        &user,
        &not_found(R::KIND),
    )?;

    let entry = state
        .store
        .update_entry(R::KIND, id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(not_found(R::KIND)))?;
    Ok(ApiResponse::success(
        format!("{} updated successfully", R::KIND.label()),
        entry,
    ))
}

/// DELETE /{incomes,expenses}/:id
pub async fn delete<R: EntryResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Entry> {
    let id = parse_id(&id)?;
    owned(
        state.store.get_entry(R::KIND, id).await?,
        |e| e.user_id,
        &user,
        &not_found(R::KIND),
    )?;

    let entry = state
        .store
        .delete_entry(R::KIND, id)
        .await?
        .ok_or_else(|| ApiError::not_found(not_found(R::KIND)))?;
    debug!("{} {} deleted", R::KIND.label(), id);
    Ok(ApiResponse::success(
        format!("{} deleted successfully", R::KIND.label()),
        entry,
    ))
}

/// GET /{incomes,expenses}/total/:userId - `{"totalIncome": n}` or `{"totalExpense": n}`
pub async fn total<R: EntryResource>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> ApiResult<Value> {
    let user_id = require_self(&user, &user_id)?;
    let total = state.store.total_entries(R::KIND, user_id).await?;
    debug!("Total {} for {}: {}", R::KIND, user_id, total);

    let mut data = Map::new();
    data.insert(R::KIND.total_key().to_string(), json!(total));
    Ok(ApiResponse::success("SUCCESS", Value::Object(data)))
}
