//! HTTP client for the wallet API, used by the `wallet` CLI.
//!
//! A `Session` (server, token, user) is handed to `ApiClient::new`; services
//! borrow the client and unwrap `{msg, data}` envelopes into flat records.

pub mod dashboard;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod session;
pub mod stats;

pub use dashboard::{load_dashboard, Dashboard, DashboardSummary, Slot};
pub use error::ClientError;
pub use http::ApiClient;
pub use models::{BudgetRecord, EntryRecord, GoalRecord, Transaction};
pub use session::{Session, SessionUser, DEFAULT_SERVER};

use crate::database::models::EntryKind;
use services::{AuthService, BudgetService, EntryService, GoalService, TransactionService};

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn incomes(&self) -> EntryService<'_> {
        EntryService::new(self, EntryKind::Income)
    }

    pub fn expenses(&self) -> EntryService<'_> {
        EntryService::new(self, EntryKind::Expense)
    }

    pub fn entries(&self, kind: EntryKind) -> EntryService<'_> {
        EntryService::new(self, kind)
    }

    pub fn budgets(&self) -> BudgetService<'_> {
        BudgetService::new(self)
    }

    pub fn goals(&self) -> GoalService<'_> {
        GoalService::new(self)
    }

    pub fn transactions(&self) -> TransactionService<'_> {
        TransactionService::new(self)
    }
}
