//! Derived figures computed from already-fetched data. Nothing here does I/O.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{EntryRecord, GoalRecord, Transaction};
use crate::database::models::goal::{progress_percent, remaining};
use crate::database::models::EntryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    #[serde(rename = "No Budget Set")]
    NoBudgetSet,
    #[serde(rename = "Over Budget")]
    OverBudget,
    Warning,
    #[serde(rename = "On Track")]
    OnTrack,
}

impl BudgetStatus {
    /// `usage = expense / budget * 100`; >= 100 is over, >= 80 is a warning.
    pub fn evaluate(total_expense: Decimal, current_budget: Decimal) -> Self {
        if current_budget.is_zero() {
            return BudgetStatus::NoBudgetSet;
        }
        let usage = total_expense / current_budget * Decimal::ONE_HUNDRED;
        if usage >= Decimal::ONE_HUNDRED {
            BudgetStatus::OverBudget
        } else if usage >= Decimal::from(80) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetStatus::NoBudgetSet => "No Budget Set",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::OnTrack => "On Track",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub current_budget: Decimal,
    pub balance: Decimal,
    pub budget_remaining: Decimal,
    pub spending_rate: Decimal,
    pub savings_rate: Decimal,
    pub budget_status: BudgetStatus,
}

impl FinancialSummary {
    pub fn compute(total_income: Decimal, total_expense: Decimal, current_budget: Decimal) -> Self {
        let (spending_rate, savings_rate) = if total_income.is_zero() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (
                total_expense / total_income * Decimal::ONE_HUNDRED,
                (total_income - total_expense) / total_income * Decimal::ONE_HUNDRED,
            )
        };

        Self {
            total_income,
            total_expense,
            current_budget,
            balance: total_income - total_expense,
            budget_remaining: total_income - current_budget,
            spending_rate,
            savings_rate,
            budget_status: BudgetStatus::evaluate(total_expense, current_budget),
        }
    }
}

/// Sum of amounts per category, in category name order.
pub fn category_totals(entries: &[EntryRecord]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.category.clone()).or_insert(Decimal::ZERO) += entry.amount;
    }
    totals
}

/// Category with the largest total; ties go to the first name in order.
pub fn top_category(entries: &[EntryRecord]) -> Option<(String, Decimal)> {
    category_totals(entries)
        .into_iter()
        .fold(None, |best, (category, total)| match best {
            Some((_, best_total)) if best_total >= total => best,
            _ => Some((category, total)),
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Per-category income, expense and net, largest `|net|` first.
pub fn category_summaries(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut by_category: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let category = if tx.category.is_empty() {
            "Uncategorized".to_string()
        } else {
            tx.category.clone()
        };
        let slot = by_category.entry(category).or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            EntryKind::Income => slot.0 += tx.amount,
            EntryKind::Expense => slot.1 += tx.amount,
        }
    }

    let mut summaries: Vec<CategorySummary> = by_category
        .into_iter()
        .map(|(category, (income, expense))| CategorySummary {
            category,
            income,
            expense,
            net: income - expense,
        })
        .collect();
    summaries.sort_by(|a, b| b.net.abs().cmp(&a.net.abs()));
    summaries
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Per-calendar-month (UTC) totals, newest month first.
pub fn monthly_summaries(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let key = (tx.created_at.year(), tx.created_at.month());
        let slot = by_month.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            EntryKind::Income => slot.0 += tx.amount,
            EntryKind::Expense => slot.1 += tx.amount,
        }
    }

    by_month
        .into_iter()
        .rev()
        .map(|((year, month), (income, expense))| MonthlySummary {
            month: format!("{:04}-{:02}", year, month),
            income,
            expense,
            net: income - expense,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    /// Since the first day of `now`'s month
    Month,
    /// Since January 1st of `now`'s year
    Year,
}

impl Period {
    fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::All => None,
            Period::Month => Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0).single(),
            Period::Year => Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).single(),
        }
    }
}

/// Transactions matching `kind` and `period` (relative to `now`), newest first.
pub fn filter_transactions(
    transactions: &[Transaction],
    kind: TypeFilter,
    period: Period,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    let start = period.start(now);
    let mut filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| match kind {
            TypeFilter::All => true,
            TypeFilter::Income => tx.kind == EntryKind::Income,
            TypeFilter::Expense => tx.kind == EntryKind::Expense,
        })
        .filter(|tx| start.map_or(true, |start| tx.created_at >= start))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub name: String,
    pub percent: Decimal,
    pub remaining: Decimal,
    pub completed: bool,
}

impl From<&GoalRecord> for GoalProgress {
    fn from(goal: &GoalRecord) -> Self {
        Self {
            name: goal.name.clone(),
            percent: progress_percent(goal.saved_amount, goal.target_amount),
            remaining: remaining(goal.saved_amount, goal.target_amount),
            completed: goal.is_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn at(y: i32, m: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, day, 12, 0, 0).unwrap()
    }

    fn tx(kind: EntryKind, category: &str, amount: Decimal, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            kind,
            name: category.to_string(),
            category: category.to_string(),
            amount,
            user_id: Uuid::nil(),
            created_at,
        }
    }

    fn expense(category: &str, amount: Decimal) -> EntryRecord {
        EntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: category.to_string(),
            category: category.to_string(),
            amount,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_for_salary_and_rent() {
        let summary = FinancialSummary::compute(d(5000), d(1500), d(2000));
        assert_eq!(summary.balance, d(3500));
        assert_eq!(summary.budget_remaining, d(3000));
        assert_eq!(summary.spending_rate, d(30));
        assert_eq!(summary.savings_rate, d(70));
        assert_eq!(summary.budget_status, BudgetStatus::OnTrack);
    }

    #[test]
    fn rates_are_zero_without_income() {
        let summary = FinancialSummary::compute(d(0), d(250), d(0));
        assert_eq!(summary.spending_rate, d(0));
        assert_eq!(summary.savings_rate, d(0));
        assert_eq!(summary.balance, d(-250));
        assert_eq!(summary.budget_status, BudgetStatus::NoBudgetSet);
    }

    #[test]
    fn budget_status_thresholds() {
        assert_eq!(BudgetStatus::evaluate(d(79), d(100)), BudgetStatus::OnTrack);
        assert_eq!(BudgetStatus::evaluate(d(80), d(100)), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::evaluate(Decimal::new(999, 1), d(100)), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::evaluate(d(100), d(100)), BudgetStatus::OverBudget);
        assert_eq!(BudgetStatus::evaluate(d(500), d(0)), BudgetStatus::NoBudgetSet);
        assert_eq!(BudgetStatus::OverBudget.to_string(), "Over Budget");
    }

    #[test]
    fn top_category_prefers_first_name_on_tie() {
        let expenses = vec![
            expense("shopping", d(50)),
            expense("food", d(30)),
            expense("food", d(20)),
            expense("bills", d(10)),
        ];
        assert_eq!(top_category(&expenses), Some(("food".to_string(), d(50))));
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn category_summaries_sort_by_absolute_net() {
        let txs = vec![
            tx(EntryKind::Income, "salary", d(5000), at(2025, 1, 5)),
            tx(EntryKind::Expense, "bills", d(1500), at(2025, 1, 6)),
            tx(EntryKind::Expense, "other", d(20), at(2025, 1, 7)),
            tx(EntryKind::Income, "other", d(100), at(2025, 1, 8)),
        ];
        let summaries = category_summaries(&txs);
        let order: Vec<&str> = summaries.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["salary", "bills", "other"]);
        assert_eq!(summaries[1].net, d(-1500));
        assert_eq!(summaries[2].net, d(80));
    }

    #[test]
    fn monthly_summaries_newest_first() {
        let txs = vec![
            tx(EntryKind::Income, "salary", d(5000), at(2024, 12, 28)),
            tx(EntryKind::Expense, "bills", d(1500), at(2025, 1, 2)),
            tx(EntryKind::Income, "salary", d(5000), at(2025, 1, 28)),
        ];
        let months = monthly_summaries(&txs);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2025-01");
        assert_eq!(months[0].net, d(3500));
        assert_eq!(months[1].month, "2024-12");
    }

    #[test]
    fn filter_by_type_and_period() {
        let now = at(2025, 3, 15);
        let txs = vec![
            tx(EntryKind::Income, "salary", d(1), at(2024, 11, 1)),
            tx(EntryKind::Expense, "food", d(2), at(2025, 1, 10)),
            tx(EntryKind::Income, "salary", d(3), at(2025, 3, 1)),
            tx(EntryKind::Expense, "food", d(4), at(2025, 3, 14)),
        ];

        let all = filter_transactions(&txs, TypeFilter::All, Period::All, now);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].amount, d(4));

        let month = filter_transactions(&txs, TypeFilter::All, Period::Month, now);
        assert_eq!(month.iter().map(|t| t.amount).collect::<Vec<_>>(), vec![d(4), d(3)]);

        let year_expenses = filter_transactions(&txs, TypeFilter::Expense, Period::Year, now);
        assert_eq!(year_expenses.iter().map(|t| t.amount).collect::<Vec<_>>(), vec![d(4), d(2)]);
    }

    #[test]
    fn goal_progress_is_capped() {
        let goal = GoalRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "Trip".into(),
            target_amount: d(1000),
            saved_amount: d(1500),
            deadline: Utc::now(),
            is_completed: true,
            created_at: Utc::now(),
        };
        let progress = GoalProgress::from(&goal);
        assert_eq!(progress.percent, d(100));
        assert_eq!(progress.remaining, d(0));
        assert!(progress.completed);
    }
}
