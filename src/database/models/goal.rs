use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings goal. `is_completed` is always derived from the amounts
/// (`saved_amount >= target_amount`) and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "targetAmount")]
    pub target_amount: Decimal,
    #[serde(rename = "savedAmount")]
    pub saved_amount: Decimal,
    pub deadline: DateTime<Utc>,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        name: String,
        target_amount: Decimal,
        saved_amount: Decimal,
        deadline: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            target_amount,
            saved_amount,
            deadline,
            is_completed: is_completed(saved_amount, target_amount),
            created_at,
        }
    }
}

pub fn is_completed(saved_amount: Decimal, target_amount: Decimal) -> bool {
    saved_amount >= target_amount
}

/// Percentage saved, capped at 100. A zero target counts as reached.
pub fn progress_percent(saved_amount: Decimal, target_amount: Decimal) -> Decimal {
    if target_amount <= Decimal::ZERO {
        return Decimal::ONE_HUNDRED;
    }
    (saved_amount / target_amount * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
}

pub fn remaining(saved_amount: Decimal, target_amount: Decimal) -> Decimal {
    (target_amount - saved_amount).max(Decimal::ZERO)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "targetAmount", default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(rename = "savedAmount", default, skip_serializing_if = "Option::is_none")]
    pub saved_amount: Option<Decimal>,
    /// RFC 3339 timestamp or a plain `YYYY-MM-DD` date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Accepted for compatibility and ignored; completion is derived.
    #[serde(rename = "isCompleted", default, skip_serializing)]
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    pub deadline: DateTime<Utc>,
}

impl NewGoal {
    pub fn into_goal(self, user_id: Uuid) -> Goal {
        Goal::new(
            Uuid::new_v4(),
            user_id,
            self.name,
            self.target_amount,
            self.saved_amount,
            self.deadline,
            Utc::now(),
        )
    }
}
