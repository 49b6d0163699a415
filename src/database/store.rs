use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::models::{
    Budget, BudgetInput, Entry, EntryInput, EntryKind, Goal, GoalInput, Month, NewUser, User,
};

pub const BUDGET_PERIOD_TAKEN: &str =
    "Budget already exists for this month. Please update the existing budget instead.";

pub const EMAIL_TAKEN: &str = "An account with this email already exists";

/// Errors from a `Store` backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or a field value is out of range.
    #[error("{0}")]
    Validation(String),

    /// A unique constraint rejected the write.
    #[error("{0}")]
    Duplicate(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for users and their finance records.
///
/// Backends run the checks in `database::schema` on every write and enforce
/// the unique constraints on `users.email` and `(user_id, month, year)` for
/// budgets. Lookups by id return `Ok(None)` for unknown ids; list operations
/// return records newest first.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release backend resources once the server has stopped.
    async fn close(&self) {}

    // Users
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn rename_user(&self, id: Uuid, name: &str) -> Result<Option<User>, StoreError>;

    // Incomes and expenses
    async fn list_entries(&self, kind: EntryKind, user_id: Uuid) -> Result<Vec<Entry>, StoreError>;
    async fn get_entry(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, StoreError>;
    async fn insert_entry(
        &self,
        kind: EntryKind,
        user_id: Uuid,
        input: EntryInput,
    ) -> Result<Entry, StoreError>;
    async fn update_entry(
        &self,
        kind: EntryKind,
        id: Uuid,
        patch: EntryInput,
    ) -> Result<Option<Entry>, StoreError>;
    async fn delete_entry(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, StoreError>;
    /// Sum of `amount` over the user's entries; 0 when there are none.
    async fn total_entries(&self, kind: EntryKind, user_id: Uuid) -> Result<Decimal, StoreError>;

    // Budgets
    async fn list_budgets(&self, user_id: Uuid) -> Result<Vec<Budget>, StoreError>;
    async fn get_budget(&self, id: Uuid) -> Result<Option<Budget>, StoreError>;
    async fn find_budget(
        &self,
        user_id: Uuid,
        month: Month,
        year: i32,
    ) -> Result<Option<Budget>, StoreError>;
    async fn insert_budget(&self, user_id: Uuid, input: BudgetInput) -> Result<Budget, StoreError>;
    async fn update_budget(&self, id: Uuid, patch: BudgetInput) -> Result<Option<Budget>, StoreError>;
    async fn delete_budget(&self, id: Uuid) -> Result<Option<Budget>, StoreError>;

    // Goals
    async fn list_goals(&self, user_id: Uuid) -> Result<Vec<Goal>, StoreError>;
    async fn get_goal(&self, id: Uuid) -> Result<Option<Goal>, StoreError>;
    async fn insert_goal(&self, user_id: Uuid, input: GoalInput) -> Result<Goal, StoreError>;
    async fn update_goal(&self, id: Uuid, patch: GoalInput) -> Result<Option<Goal>, StoreError>;
    async fn delete_goal(&self, id: Uuid) -> Result<Option<Goal>, StoreError>;
}
