use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::models::{
    Budget, BudgetInput, Entry, EntryInput, EntryKind, Goal, GoalInput, Month, NewUser, User,
};
use super::schema;
use super::store::{Store, StoreError, BUDGET_PERIOD_TAKEN, EMAIL_TAKEN};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    incomes: Vec<Entry>,
    expenses: Vec<Entry>,
    budgets: Vec<Budget>,
    goals: Vec<Goal>,
}

impl Tables {
    fn entries(&self, kind: EntryKind) -> &Vec<Entry> {
        match kind {
            EntryKind::Income => &self.incomes,
            EntryKind::Expense => &self.expenses,
        }
    }

    fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Entry> {
        match kind {
            EntryKind::Income => &mut self.incomes,
            EntryKind::Expense => &mut self.expenses,
        }
    }

    fn budget_period_taken(&self, user_id: Uuid, month: Month, year: i32, except: Option<Uuid>) -> bool {
        self.budgets.iter().any(|b| {
            b.user_id == user_id && b.month == month && b.year == year && Some(b.id) != except
        })
    }
}

/// Newest first; among equal keys the later insert wins.
fn newest_first<T: Clone, K: Ord>(rows: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}

/// In-process store with the same schema checks and unique constraints as
/// the PostgreSQL store. Writes hold the table lock for the whole
/// check-and-insert, so constraint checks are atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let email = user.email.to_lowercase();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Duplicate(EMAIL_TAKEN.to_string()));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        debug!("memory store: inserted user {}", user.id);
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn rename_user(&self, id: Uuid, name: &str) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.name = name.to_string();
            u.clone()
        }))
    }

    async fn list_entries(&self, kind: EntryKind, user_id: Uuid) -> Result<Vec<Entry>, StoreError> {
        let tables = self.tables.read().await;
        let owned: Vec<Entry> = tables
            .entries(kind)
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(&owned, |e| e.created_at))
    }

    async fn get_entry(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.entries(kind).iter().find(|e| e.id == id).cloned())
    }

    async fn insert_entry(
        &self,
        kind: EntryKind,
        user_id: Uuid,
        input: EntryInput,
    ) -> Result<Entry, StoreError> {
        let entry = schema::validate_entry(kind, &input)?.into_entry(user_id);
        let mut tables = self.tables.write().await;
        tables.entries_mut(kind).push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(
        &self,
        kind: EntryKind,
        id: Uuid,
        patch: EntryInput,
    ) -> Result<Option<Entry>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.entries_mut(kind).iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        let updated = schema::merge_entry(kind, slot, &patch)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_entry(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, StoreError> {
        let mut tables = self.tables.write().await;
        let entries = tables.entries_mut(kind);
        Ok(entries
            .iter()
            .position(|e| e.id == id)
            .map(|idx| entries.remove(idx)))
    }

    async fn total_entries(&self, kind: EntryKind, user_id: Uuid) -> Result<Decimal, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .entries(kind)
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.amount)
            .sum())
    }

    async fn list_budgets(&self, user_id: Uuid) -> Result<Vec<Budget>, StoreError> {
        let tables = self.tables.read().await;
        let owned: Vec<Budget> = tables
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(&owned, |b| (b.year, b.created_at)))
    }

    async fn get_budget(&self, id: Uuid) -> Result<Option<Budget>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.budgets.iter().find(|b| b.id == id).cloned())
    }

    async fn find_budget(
        &self,
        user_id: Uuid,
        month: Month,
        year: i32,
    ) -> Result<Option<Budget>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .budgets
            .iter()
            .find(|b| b.user_id == user_id && b.month == month && b.year == year)
            .cloned())
    }

    async fn insert_budget(&self, user_id: Uuid, input: BudgetInput) -> Result<Budget, StoreError> {
        let budget = schema::validate_budget(&input)?.into_budget(user_id);
        let mut tables = self.tables.write().await;
        if tables.budget_period_taken(user_id, budget.month, budget.year, None) {
            return Err(StoreError::Duplicate(BUDGET_PERIOD_TAKEN.to_string()));
        }
        tables.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn update_budget(&self, id: Uuid, patch: BudgetInput) -> Result<Option<Budget>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.budgets.iter().find(|b| b.id == id) else {
            return Ok(None);
        };
        let updated = schema::merge_budget(existing, &patch)?;
        if tables.budget_period_taken(updated.user_id, updated.month, updated.year, Some(id)) {
            return Err(StoreError::Duplicate(BUDGET_PERIOD_TAKEN.to_string()));
        }
        if let Some(slot) = tables.budgets.iter_mut().find(|b| b.id == id) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete_budget(&self, id: Uuid) -> Result<Option<Budget>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .budgets
            .iter()
            .position(|b| b.id == id)
            .map(|idx| tables.budgets.remove(idx)))
    }

    async fn list_goals(&self, user_id: Uuid) -> Result<Vec<Goal>, StoreError> {
        let tables = self.tables.read().await;
        let owned: Vec<Goal> = tables
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(&owned, |g| g.created_at))
    }

    async fn get_goal(&self, id: Uuid) -> Result<Option<Goal>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.goals.iter().find(|g| g.id == id).cloned())
    }

    async fn insert_goal(&self, user_id: Uuid, input: GoalInput) -> Result<Goal, StoreError> {
        let goal = schema::validate_goal(&input)?.into_goal(user_id);
        let mut tables = self.tables.write().await;
        tables.goals.push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, id: Uuid, patch: GoalInput) -> Result<Option<Goal>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        let updated = schema::merge_goal(slot, &patch)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_goal(&self, id: Uuid) -> Result<Option<Goal>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .goals
            .iter()
            .position(|g| g.id == id)
            .map(|idx| tables.goals.remove(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::BudgetCategoryInput;

    fn income(name: &str, amount: Decimal) -> EntryInput {
        EntryInput {
            name: Some(name.into()),
            category: Some("salary".into()),
            amount: Some(amount),
            ..Default::default()
        }
    }

    fn january_budget() -> BudgetInput {
        BudgetInput {
            month: Some("January".into()),
            year: Some(2025),
            categories: Some(vec![BudgetCategoryInput {
                name: Some("Food".into()),
                limit: Some(Decimal::from(300)),
            }]),
            total_amount: Some(Decimal::from(300)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn duplicate_budget_period_is_rejected() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        store.insert_budget(user, january_budget()).await.unwrap();
        let err = store.insert_budget(user, january_budget()).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref msg) if msg == BUDGET_PERIOD_TAKEN));
        assert_eq!(store.list_budgets(user).await.unwrap().len(), 1);

        // Another user may budget the same period
        store.insert_budget(Uuid::new_v4(), january_budget()).await.unwrap();
    }

    #[tokio::test]
    async fn moving_a_budget_onto_a_taken_period_is_rejected() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.insert_budget(user, january_budget()).await.unwrap();

        let mut february = january_budget();
        february.month = Some("February".into());
        let feb = store.insert_budget(user, february).await.unwrap();

        let patch = BudgetInput {
            month: Some("January".into()),
            ..Default::default()
        };
        let err = store.update_budget(feb.id, patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        let unchanged = store.get_budget(feb.id).await.unwrap().unwrap();
        assert_eq!(unchanged.month, Month::February);
    }

    #[tokio::test]
    async fn totals_match_listed_amounts() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert_eq!(store.total_entries(EntryKind::Income, user).await.unwrap(), Decimal::ZERO);

        for (name, amount) in [("Salary", "5000"), ("Gift", "0"), ("Interest", "12.5"), ("Cashback", "0.1")] {
            let amount: Decimal = amount.parse().unwrap();
            store.insert_entry(EntryKind::Income, user, income(name, amount)).await.unwrap();
        }
        store
            .insert_entry(EntryKind::Income, Uuid::new_v4(), income("Other", Decimal::from(99)))
            .await
            .unwrap();

        let listed: Decimal = store
            .list_entries(EntryKind::Income, user)
            .await
            .unwrap()
            .iter()
            .map(|e| e.amount)
            .sum();
        assert_eq!(store.total_entries(EntryKind::Income, user).await.unwrap(), listed);
        assert_eq!(listed, Decimal::new(50126, 1));
        assert_eq!(store.total_entries(EntryKind::Expense, user).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn close_keeps_memory_tables() {
        let store: Box<dyn Store> = Box::new(MemoryStore::new());
        let user = Uuid::new_v4();
        store.insert_entry(EntryKind::Income, user, income("Salary", Decimal::ONE)).await.unwrap();

        store.close().await;
        store.ping().await.unwrap();
        assert_eq!(store.list_entries(EntryKind::Income, user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn entries_are_listed_newest_first() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        for name in ["first", "second", "third"] {
            store.insert_entry(EntryKind::Income, user, income(name, Decimal::ONE)).await.unwrap();
        }
        let names: Vec<String> = store
            .list_entries(EntryKind::Income, user)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn deleting_unknown_id_leaves_store_unchanged() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.insert_entry(EntryKind::Expense, user, EntryInput {
            name: Some("Rent".into()),
            category: Some("bills".into()),
            amount: Some(Decimal::from(1500)),
            ..Default::default()
        })
        .await
        .unwrap();

        assert!(store.delete_entry(EntryKind::Expense, Uuid::new_v4()).await.unwrap().is_none());
        assert_eq!(store.list_entries(EntryKind::Expense, user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn emails_are_unique_case_insensitively() {
        let store = MemoryStore::new();
        let new_user = |email: &str| NewUser {
            name: "Ada".into(),
            email: email.into(),
            password_hash: "hash".into(),
        };
        store.insert_user(new_user("ada@example.com")).await.unwrap();
        let err = store.insert_user(new_user("ADA@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert!(store.find_user_by_email("Ada@Example.com").await.unwrap().is_some());
    }
}
