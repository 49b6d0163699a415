//! Dashboard load: independent fetches fill result slots as they arrive and the
//! summary is recomputed after every arrival, so partial summaries are visible.

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ClientError;
use super::http::ApiClient;
use super::models::{BudgetRecord, EntryRecord, GoalRecord};
use super::services::{BudgetService, EntryService, GoalService};
use super::stats::{top_category, FinancialSummary, GoalProgress};
use crate::database::models::{EntryKind, Month};

#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Pending
    }
}

impl<T> Slot<T> {
    fn fill(&mut self, result: Result<T, ClientError>) {
        *self = match result {
            Ok(value) => Slot::Ready(value),
            Err(e) => Slot::Failed(e.to_string()),
        };
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Slot::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }
}

/// One completed fetch
#[derive(Debug)]
pub enum Arrival {
    IncomeTotal(Result<Decimal, ClientError>),
    ExpenseTotal(Result<Decimal, ClientError>),
    CurrentBudget(Result<Option<BudgetRecord>, ClientError>),
    Goals(Result<Vec<GoalRecord>, ClientError>),
    Expenses(Result<Vec<EntryRecord>, ClientError>),
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub income_total: Slot<Decimal>,
    pub expense_total: Slot<Decimal>,
    pub current_budget: Slot<Option<BudgetRecord>>,
    pub goals: Slot<Vec<GoalRecord>>,
    pub expenses: Slot<Vec<EntryRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub financial: FinancialSummary,
    pub top_category: Option<TopCategory>,
    pub goals: Vec<GoalProgress>,
    pub complete: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub category: String,
    pub amount: Decimal,
}

impl Dashboard {
    pub fn apply(&mut self, arrival: Arrival) {
        match arrival {
            Arrival::IncomeTotal(r) => self.income_total.fill(r),
            Arrival::ExpenseTotal(r) => self.expense_total.fill(r),
            Arrival::CurrentBudget(r) => self.current_budget.fill(r),
            Arrival::Goals(r) => self.goals.fill(r),
            Arrival::Expenses(r) => self.expenses.fill(r),
        }
    }

    pub fn is_complete(&self) -> bool {
        !(self.income_total.is_pending()
            || self.expense_total.is_pending()
            || self.current_budget.is_pending()
            || self.goals.is_pending()
            || self.expenses.is_pending())
    }

    /// Errors of failed slots, labelled by slot.
    pub fn errors(&self) -> Vec<String> {
        [
            ("income total", self.income_total.error()),
            ("expense total", self.expense_total.error()),
            ("current budget", self.current_budget.error()),
            ("goals", self.goals.error()),
            ("expenses", self.expenses.error()),
        ]
        .into_iter()
        .filter_map(|(slot, err)| err.map(|e| format!("{}: {}", slot, e)))
        .collect()
    }

    /// Summary over whatever has arrived. Missing figures count as zero.
    pub fn summary(&self) -> DashboardSummary {
        let income = self.income_total.ready().copied().unwrap_or(Decimal::ZERO);
        let expense = self.expense_total.ready().copied().unwrap_or(Decimal::ZERO);
        let budget = self
            .current_budget
            .ready()
            .and_then(Option::as_ref)
            .map_or(Decimal::ZERO, |b| b.total_amount);

        DashboardSummary {
            financial: FinancialSummary::compute(income, expense, budget),
            top_category: self
                .expenses
                .ready()
                .and_then(|expenses| top_category(expenses))
                .map(|(category, amount)| TopCategory { category, amount }),
            goals: self
                .goals
                .ready()
                .map(|goals| goals.iter().map(GoalProgress::from).collect())
                .unwrap_or_default(),
            complete: self.is_complete(),
            errors: self.errors(),
        }
    }
}

/// Fetch every dashboard slot concurrently. `on_update` sees the dashboard
/// after each arrival; a failed fetch fills its slot with the error and the
/// rest keep going.
pub async fn load_dashboard<F>(
    client: &ApiClient,
    month: Month,
    year: i32,
    mut on_update: F,
) -> Dashboard
where
    F: FnMut(&Dashboard),
{
    let incomes = EntryService::new(client, EntryKind::Income);
    let expense_totals = EntryService::new(client, EntryKind::Expense);
    let expense_list = EntryService::new(client, EntryKind::Expense);
    let budgets = BudgetService::new(client);
    let goals = GoalService::new(client);

    let mut pending: FuturesUnordered<BoxFuture<'_, Arrival>> = FuturesUnordered::new();
    pending.push(async move { Arrival::IncomeTotal(incomes.total().await) }.boxed());
    pending.push(async move { Arrival::ExpenseTotal(expense_totals.total().await) }.boxed());
    pending.push(
        async move { Arrival::CurrentBudget(budgets.by_month(month, year).await) }.boxed(),
    );
    pending.push(async move { Arrival::Goals(goals.list().await) }.boxed());
    pending.push(async move { Arrival::Expenses(expense_list.list().await) }.boxed());

    let mut dashboard = Dashboard::default();
    while let Some(arrival) = pending.next().await {
        tracing::debug!("dashboard arrival: {}", arrival_name(&arrival));
        dashboard.apply(arrival);
        on_update(&dashboard);
    }
    dashboard
}

fn arrival_name(arrival: &Arrival) -> &'static str {
    match arrival {
        Arrival::IncomeTotal(_) => "income_total",
        Arrival::ExpenseTotal(_) => "expense_total",
        Arrival::CurrentBudget(_) => "current_budget",
        Arrival::Goals(_) => "goals",
        Arrival::Expenses(_) => "expenses",
    }
}
