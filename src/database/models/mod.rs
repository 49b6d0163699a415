pub mod budget;
pub mod entry;
pub mod goal;
pub mod user;

pub use budget::{Budget, BudgetCategory, BudgetCategoryInput, BudgetInput, Month, NewBudget};
pub use entry::{Entry, EntryInput, EntryKind, NewEntry};
pub use goal::{Goal, GoalInput, NewGoal};
pub use user::{NewUser, User, UserSummary};
