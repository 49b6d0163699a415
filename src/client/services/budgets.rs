use uuid::Uuid;

use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::client::models::BudgetRecord;
use crate::database::models::{BudgetInput, Month};

pub struct BudgetService<'a> {
    client: &'a ApiClient,
}

impl<'a> BudgetService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<BudgetRecord>, ClientError> {
        let user_id = self.client.user_id()?;
        self.client.get(&format!("/budgets/{}", user_id)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<BudgetRecord, ClientError> {
        self.client.get(&format!("/budgets/single/{}", id)).await
    }

    /// Budget for one period; `None` when none has been set.
    pub async fn by_month(&self, month: Month, year: i32) -> Result<Option<BudgetRecord>, ClientError> {
        let user_id = self.client.user_id()?;
        match self
            .client
            .get(&format!("/budgets/{}/{}/{}", user_id, month, year))
            .await
        {
            Ok(budget) => Ok(Some(budget)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create(&self, input: &BudgetInput) -> Result<BudgetRecord, ClientError> {
        let mut body = input.clone();
        body.user_id = Some(self.client.user_id()?);
        self.client.post("/budgets", &body).await
    }

    pub async fn update(&self, id: Uuid, patch: &BudgetInput) -> Result<BudgetRecord, ClientError> {
        self.client.put(&format!("/budgets/{}", id), patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<BudgetRecord, ClientError> {
        self.client.delete(&format!("/budgets/{}", id)).await
    }
}
