use uuid::Uuid;

use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::client::models::GoalRecord;
use crate::database::models::GoalInput;

pub struct GoalService<'a> {
    client: &'a ApiClient,
}

impl<'a> GoalService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<GoalRecord>, ClientError> {
        let user_id = self.client.user_id()?;
        self.client.get(&format!("/goals/{}", user_id)).await
    }

    pub async fn create(&self, input: &GoalInput) -> Result<GoalRecord, ClientError> {
        let mut body = input.clone();
        body.user_id = Some(self.client.user_id()?);
        self.client.post("/goals", &body).await
    }

    pub async fn update(&self, id: Uuid, patch: &GoalInput) -> Result<GoalRecord, ClientError> {
        self.client.put(&format!("/goals/{}", id), patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<GoalRecord, ClientError> {
        self.client.delete(&format!("/goals/{}", id)).await
    }
}
