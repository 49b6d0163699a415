//! Schema checks shared by every store backend.
//!
//! Each check turns a loosely-typed request body into a validated value or a
//! `StoreError::Validation` whose message lists every failing path, in the
//! form `"<Resource> validation failed: <path>: <message>, ..."`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::models::{
    Budget, BudgetCategory, BudgetCategoryInput, BudgetInput, Entry, EntryInput, EntryKind,
    Goal, GoalInput, Month, NewBudget, NewEntry, NewGoal,
};
use super::store::StoreError;

/// Collects path-level violations for one document.
struct Violations {
    resource: &'static str,
    items: Vec<(String, String)>,
}

impl Violations {
    fn new(resource: &'static str) -> Self {
        Self {
            resource,
            items: Vec::new(),
        }
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.items.push((path.into(), message.into()));
    }

    fn finish(self) -> Result<(), StoreError> {
        if self.items.is_empty() {
            return Ok(());
        }
        let detail = self
            .items
            .iter()
            .map(|(path, message)| format!("{}: {}", path, message))
            .collect::<Vec<_>>()
            .join(", ");
        Err(StoreError::Validation(format!(
            "{} validation failed: {}",
            self.resource, detail
        )))
    }
}

fn required_text(
    violations: &mut Violations,
    path: &str,
    value: Option<&String>,
    message: &str,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => {
            violations.push(path, message);
            String::new()
        }
    }
}

fn non_negative(
    violations: &mut Violations,
    path: &str,
    value: Option<Decimal>,
    required: &str,
    negative: &str,
) -> Decimal {
    match value {
        None => {
            violations.push(path, required);
            Decimal::ZERO
        }
        Some(v) if v < Decimal::ZERO => {
            violations.push(path, negative);
            v
        }
        Some(v) => v,
    }
}

pub fn validate_entry(kind: EntryKind, input: &EntryInput) -> Result<NewEntry, StoreError> {
    let mut violations = Violations::new(kind.label());

    let name = required_text(
        &mut violations,
        "name",
        input.name.as_ref(),
        &format!("{} name is required", kind.label()),
    );

    let category = match input.category.as_deref() {
        None => {
            violations.push("category", "Category is required");
            String::new()
        }
        Some(c) if c.trim().is_empty() => {
            violations.push("category", "Category is required");
            String::new()
        }
        Some(c) if !kind.categories().contains(&c) => {
            violations.push(
                "category",
                format!("`{}` is not a valid enum value for path `category`.", c),
            );
            c.to_string()
        }
        Some(c) => c.to_string(),
    };

    let amount = non_negative(
        &mut violations,
        "amount",
        input.amount,
        "Amount is required",
        "Amount must be positive",
    );

    violations.finish()?;
    Ok(NewEntry {
        name,
        category,
        amount,
    })
}

/// Applies a partial update onto a stored entry and re-validates the result.
pub fn merge_entry(kind: EntryKind, existing: &Entry, patch: &EntryInput) -> Result<Entry, StoreError> {
    let merged = EntryInput {
        user_id: None,
        name: patch.name.clone().or_else(|| Some(existing.name.clone())),
        category: patch.category.clone().or_else(|| Some(existing.category.clone())),
        amount: patch.amount.or(Some(existing.amount)),
    };
    let valid = validate_entry(kind, &merged)?;
    Ok(Entry {
        id: existing.id,
        user_id: existing.user_id,
        name: valid.name,
        category: valid.category,
        amount: valid.amount,
        created_at: existing.created_at,
    })
}

fn validate_categories(
    violations: &mut Violations,
    categories: Option<&Vec<BudgetCategoryInput>>,
) -> Vec<BudgetCategory> {
    let Some(categories) = categories else {
        return Vec::new();
    };

    categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let name = required_text(
                violations,
                &format!("categories.{}.name", i),
                category.name.as_ref(),
                "Category name is required",
            );
            let limit = non_negative(
                violations,
                &format!("categories.{}.limit", i),
                category.limit,
                "Category limit is required",
                "Limit must be positive",
            );
            BudgetCategory { name, limit }
        })
        .collect()
}

/// Validates a budget body. A missing `year` defaults to the current year.
pub fn validate_budget(input: &BudgetInput) -> Result<NewBudget, StoreError> {
    let mut violations = Violations::new("Budget");

    let month = match input.month.as_deref() {
        None | Some("") => {
            violations.push("month", "Month is required");
            None
        }
        Some(m) => match m.parse::<Month>() {
            Ok(month) => Some(month),
            Err(message) => {
                violations.push("month", message);
                None
            }
        },
    };

    let year = input.year.unwrap_or_else(|| Utc::now().year());
    let categories = validate_categories(&mut violations, input.categories.as_ref());

    let total_amount = non_negative(
        &mut violations,
        "totalAmount",
        input.total_amount,
        "Total amount is required",
        "Total amount must be positive",
    );

    violations.finish()?;
    Ok(NewBudget {
        // finish() has rejected a missing month
        month: month.unwrap_or(Month::January),
        year,
        categories,
        total_amount,
    })
}

pub fn merge_budget(existing: &Budget, patch: &BudgetInput) -> Result<Budget, StoreError> {
    let merged = BudgetInput {
        user_id: None,
        month: patch
            .month
            .clone()
            .or_else(|| Some(existing.month.name().to_string())),
        year: patch.year.or(Some(existing.year)),
        categories: patch.categories.clone().or_else(|| {
            Some(
                existing
                    .categories
                    .iter()
                    .map(|c| BudgetCategoryInput {
                        name: Some(c.name.clone()),
                        limit: Some(c.limit),
                    })
                    .collect(),
            )
        }),
        total_amount: patch.total_amount.or(Some(existing.total_amount)),
    };
    let valid = validate_budget(&merged)?;
    Ok(Budget {
        id: existing.id,
        user_id: existing.user_id,
        month: valid.month,
        year: valid.year,
        categories: valid.categories,
        total_amount: valid.total_amount,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    })
}

/// Accepts RFC 3339 timestamps and plain dates (taken as midnight UTC).
pub fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn validate_goal(input: &GoalInput) -> Result<NewGoal, StoreError> {
    let mut violations = Violations::new("Goal");

    let name = required_text(
        &mut violations,
        "name",
        input.name.as_ref(),
        "Goal name is required",
    );
    let target_amount = non_negative(
        &mut violations,
        "targetAmount",
        input.target_amount,
        "Target amount is required",
        "Target amount must be positive",
    );
    let saved_amount = non_negative(
        &mut violations,
        "savedAmount",
        Some(input.saved_amount.unwrap_or(Decimal::ZERO)),
        "Saved amount is required",
        "Saved amount must be positive",
    );

    let deadline = match input.deadline.as_deref() {
        None | Some("") => {
            violations.push("deadline", "Deadline is required");
            None
        }
        Some(raw) => {
            let parsed = parse_deadline(raw);
            if parsed.is_none() {
                violations.push("deadline", format!("Cast to date failed for value \"{}\"", raw));
            }
            parsed
        }
    };

    violations.finish()?;
    Ok(NewGoal {
        name,
        target_amount,
        saved_amount,
        deadline: deadline.unwrap_or_else(Utc::now),
    })
}

pub fn merge_goal(existing: &Goal, patch: &GoalInput) -> Result<Goal, StoreError> {
    let merged = GoalInput {
        user_id: None,
        name: patch.name.clone().or_else(|| Some(existing.name.clone())),
        target_amount: patch.target_amount.or(Some(existing.target_amount)),
        saved_amount: patch.saved_amount.or(Some(existing.saved_amount)),
        deadline: patch
            .deadline
            .clone()
            .or_else(|| Some(existing.deadline.to_rfc3339())),
        is_completed: None,
    };
    let valid = validate_goal(&merged)?;
    Ok(Goal::new(
        existing.id,
        existing.user_id,
        valid.name,
        valid.target_amount,
        valid.saved_amount,
        valid.deadline,
        existing.created_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use uuid::Uuid;

    fn message(err: StoreError) -> String {
        match err {
            StoreError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn entry_requires_every_field() {
        let err = validate_entry(EntryKind::Income, &EntryInput::default()).unwrap_err();
        assert_eq!(
            message(err),
            "Income validation failed: name: Income name is required, \
             category: Category is required, amount: Amount is required"
        );
    }

    #[test]
    fn entry_rejects_foreign_category_and_negative_amount() {
        let input = EntryInput {
            name: Some("Groceries".into()),
            category: Some("salary".into()),
            amount: Some(Decimal::from(-5)),
            ..Default::default()
        };
        let msg = message(validate_entry(EntryKind::Expense, &input).unwrap_err());
        assert!(msg.starts_with("Expense validation failed:"));
        assert!(msg.contains("`salary` is not a valid enum value for path `category`."));
        assert!(msg.contains("amount: Amount must be positive"));
    }

    #[test]
    fn entry_accepts_zero_and_fractional_amounts() {
        for amount in [Decimal::ZERO, Decimal::new(1275, 2)] {
            let input = EntryInput {
                name: Some("Coffee".into()),
                category: Some("food".into()),
                amount: Some(amount),
                ..Default::default()
            };
            let valid = validate_entry(EntryKind::Expense, &input).unwrap();
            assert_eq!(valid.amount, amount);
        }
    }

    #[test]
    fn text_is_stored_as_submitted() {
        let input = EntryInput {
            name: Some("  Coffee ".into()),
            category: Some("food".into()),
            amount: Some(Decimal::ONE),
            ..Default::default()
        };
        let valid = validate_entry(EntryKind::Expense, &input).unwrap();
        assert_eq!(valid.name, "  Coffee ");

        let blank = EntryInput {
            name: Some("   ".into()),
            ..input.clone()
        };
        let msg = message(validate_entry(EntryKind::Expense, &blank).unwrap_err());
        assert_eq!(msg, "Expense validation failed: name: Expense name is required");

        let padded = EntryInput {
            category: Some(" food".into()),
            ..input
        };
        let msg = message(validate_entry(EntryKind::Expense, &padded).unwrap_err());
        assert!(msg.contains("` food` is not a valid enum value for path `category`."), "{}", msg);
    }

    #[test]
    fn merge_entry_keeps_unspecified_fields() {
        let existing = NewEntry {
            name: "Salary".into(),
            category: "salary".into(),
            amount: Decimal::from(5000),
        }
        .into_entry(Uuid::new_v4());

        let patch = EntryInput {
            amount: Some(Decimal::from(5200)),
            ..Default::default()
        };
        let merged = merge_entry(EntryKind::Income, &existing, &patch).unwrap();
        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.name, "Salary");
        assert_eq!(merged.amount, Decimal::from(5200));
        assert_eq!(merged.created_at, existing.created_at);

        let bad = EntryInput {
            category: Some("bills".into()),
            ..Default::default()
        };
        assert!(merge_entry(EntryKind::Income, &existing, &bad).is_err());
    }

    #[test]
    fn budget_validates_month_and_categories() {
        let input = BudgetInput {
            month: Some("Smarch".into()),
            year: Some(2025),
            categories: Some(vec![BudgetCategoryInput {
                name: None,
                limit: Some(Decimal::from(-1)),
            }]),
            total_amount: Some(Decimal::from(300)),
            ..Default::default()
        };
        let msg = message(validate_budget(&input).unwrap_err());
        assert!(msg.contains("month: `Smarch` is not a valid enum value for path `month`."));
        assert!(msg.contains("categories.0.name: Category name is required"));
        assert!(msg.contains("categories.0.limit: Limit must be positive"));
    }

    #[test]
    fn budget_year_defaults_to_current() {
        let input = BudgetInput {
            month: Some("January".into()),
            total_amount: Some(Decimal::ZERO),
            ..Default::default()
        };
        let valid = validate_budget(&input).unwrap();
        assert_eq!(valid.year, Utc::now().year());
        assert!(valid.categories.is_empty());
    }

    #[test]
    fn deadline_accepts_dates_and_timestamps() {
        let date = parse_deadline("2026-01-20").unwrap();
        assert_eq!(date.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        assert_eq!(date.hour(), 0);

        let ts = parse_deadline("2026-06-05T12:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);

        assert!(parse_deadline("next tuesday").is_none());
    }

    #[test]
    fn goal_defaults_saved_amount_and_requires_deadline() {
        let input = GoalInput {
            name: Some("Emergency Fund".into()),
            target_amount: Some(Decimal::from(5000)),
            deadline: Some("2026-12-31".into()),
            ..Default::default()
        };
        let valid = validate_goal(&input).unwrap();
        assert_eq!(valid.saved_amount, Decimal::ZERO);

        let missing = GoalInput {
            name: Some("Trip".into()),
            target_amount: Some(Decimal::from(3000)),
            ..Default::default()
        };
        assert_eq!(
            message(validate_goal(&missing).unwrap_err()),
            "Goal validation failed: deadline: Deadline is required"
        );
    }

    #[test]
    fn merge_goal_recomputes_completion() {
        let existing = NewGoal {
            name: "Laptop".into(),
            target_amount: Decimal::from(1200),
            saved_amount: Decimal::from(600),
            deadline: parse_deadline("2026-01-20").unwrap(),
        }
        .into_goal(Uuid::new_v4());
        assert!(!existing.is_completed);

        let patch = GoalInput {
            saved_amount: Some(Decimal::from(1200)),
            is_completed: Some(false),
            ..Default::default()
        };
        let merged = merge_goal(&existing, &patch).unwrap();
        assert!(merged.is_completed);
        assert_eq!(merged.deadline, existing.deadline);
    }
}
