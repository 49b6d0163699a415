pub mod auth;
pub mod budgets;
pub mod entries;
pub mod goals;
pub mod transactions;

pub use auth::AuthService;
pub use budgets::BudgetService;
pub use entries::EntryService;
pub use goals::GoalService;
pub use transactions::TransactionService;
