use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const INCOME_CATEGORIES: &[&str] = &["salary", "freelance", "investments", "other"];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "food",
    "transport",
    "shopping",
    "bills",
    "entertainment",
    "other",
];

/// Incomes and expenses share one record layout; the kind selects the
/// table, the allowed categories and the wording of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn table(self) -> &'static str {
        match self {
            EntryKind::Income => "incomes",
            EntryKind::Expense => "expenses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }

    pub fn categories(self) -> &'static [&'static str] {
        match self {
            EntryKind::Income => INCOME_CATEGORIES,
            EntryKind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Key of the aggregate in `GET /<table>/total/:userId` responses.
    pub fn total_key(self) -> &'static str {
        match self {
            EntryKind::Income => "totalIncome",
            EntryKind::Expense => "totalExpense",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request body for create and update. Every field is optional so the schema
/// layer can report missing fields with its own messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

/// Fields of an entry that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub name: String,
    pub category: String,
    pub amount: Decimal,
}

impl NewEntry {
    pub fn into_entry(self, user_id: Uuid) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            user_id,
            name: self.name,
            category: self.category,
            amount: self.amount,
            created_at: Utc::now(),
        }
    }
}
