use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::client::models::EntryRecord;
use crate::database::models::{EntryInput, EntryKind};

/// Incomes or expenses of the logged-in user, depending on `kind`.
pub struct EntryService<'a> {
    client: &'a ApiClient,
    kind: EntryKind,
}

impl<'a> EntryService<'a> {
    pub fn new(client: &'a ApiClient, kind: EntryKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub async fn list(&self) -> Result<Vec<EntryRecord>, ClientError> {
        let user_id = self.client.user_id()?;
        self.client
            .get(&format!("/{}/{}", self.kind.table(), user_id))
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<EntryRecord, ClientError> {
        self.client
            .get(&format!("/{}/single/{}", self.kind.table(), id))
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        category: &str,
        amount: Decimal,
    ) -> Result<EntryRecord, ClientError> {
        let body = EntryInput {
            user_id: Some(self.client.user_id()?),
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            amount: Some(amount),
        };
        self.client.post(&format!("/{}", self.kind.table()), &body).await
    }

    /// Fields left `None` keep their stored value.
    pub async fn update(&self, id: Uuid, patch: &EntryInput) -> Result<EntryRecord, ClientError> {
        self.client
            .put(&format!("/{}/{}", self.kind.table(), id), patch)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<EntryRecord, ClientError> {
        self.client
            .delete(&format!("/{}/{}", self.kind.table(), id))
            .await
    }

    pub async fn total(&self) -> Result<Decimal, ClientError> {
        let user_id = self.client.user_id()?;
        let data: Value = self
            .client
            .get(&format!("/{}/total/{}", self.kind.table(), user_id))
            .await?;
        data.get(self.kind.total_key())
            .cloned()
            .and_then(|total| serde_json::from_value::<Decimal>(total).ok())
            .ok_or_else(|| ClientError::Decode(format!("missing {}", self.kind.total_key())))
    }
}
