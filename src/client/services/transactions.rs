use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::client::models::{EntryRecord, Transaction};
use crate::database::models::EntryKind;

use super::EntryService;

pub struct TransactionService<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Incomes and expenses fetched concurrently, tagged and merged newest first.
    /// Either fetch failing fails the whole call.
    pub async fn get_all(&self) -> Result<Vec<Transaction>, ClientError> {
        let incomes = EntryService::new(self.client, EntryKind::Income);
        let expenses = EntryService::new(self.client, EntryKind::Expense);

        let (incomes, expenses) = futures::try_join!(incomes.list(), expenses.list())?;
        let merged = merge(incomes, expenses);
        tracing::debug!("merged {} transactions", merged.len());
        Ok(merged)
    }
}

pub fn merge(incomes: Vec<EntryRecord>, expenses: Vec<EntryRecord>) -> Vec<Transaction> {
    let mut all: Vec<Transaction> = incomes
        .into_iter()
        .map(|e| Transaction::from_entry(EntryKind::Income, e))
        .chain(
            expenses
                .into_iter()
                .map(|e| Transaction::from_entry(EntryKind::Expense, e)),
        )
        .collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all
}
