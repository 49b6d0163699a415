//! Flat view models. Wire records use `_id` and a few camelCase fields; the
//! client deserializes either spelling and always serializes snake_case `id`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{BudgetCategory, EntryKind, Month};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub month: Month,
    pub year: i32,
    pub categories: Vec<BudgetCategory>,
    #[serde(alias = "totalAmount")]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(alias = "targetAmount")]
    pub target_amount: Decimal,
    #[serde(alias = "savedAmount")]
    pub saved_amount: Decimal,
    pub deadline: DateTime<Utc>,
    #[serde(alias = "isCompleted")]
    pub is_completed: bool,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// An income or expense tagged with its type. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub category: String,
    pub amount: Decimal,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn from_entry(kind: EntryKind, entry: EntryRecord) -> Self {
        Self {
            id: entry.id,
            kind,
            name: entry.name,
            category: entry.category,
            amount: entry.amount,
            user_id: entry.user_id,
            created_at: entry.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_goal_maps_to_flat_view() {
        let id = Uuid::new_v4();
        let user = Uuid::new_v4();
        let wire = json!({
            "_id": id,
            "user_id": user,
            "name": "Laptop",
            "targetAmount": 1200.0,
            "savedAmount": 600.0,
            "deadline": "2025-12-31T00:00:00Z",
            "isCompleted": false,
            "createdAt": "2025-01-01T00:00:00Z"
        });
        let goal: GoalRecord = serde_json::from_value(wire).unwrap();
        assert_eq!(goal.id, id);
        assert_eq!(goal.target_amount, Decimal::from(1200));

        let flat = serde_json::to_value(&goal).unwrap();
        assert_eq!(flat["id"], json!(id));
        assert!(flat.get("_id").is_none());
        assert_eq!(flat["saved_amount"], json!(600.0));
    }

    #[test]
    fn transaction_type_is_serialized_as_type() {
        let entry = EntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Rent".into(),
            category: "bills".into(),
            amount: Decimal::from(1500),
            created_at: Utc::now(),
        };
        let tx = Transaction::from_entry(EntryKind::Expense, entry);
        assert_eq!(serde_json::to_value(&tx).unwrap()["type"], json!("expense"));
    }
}
