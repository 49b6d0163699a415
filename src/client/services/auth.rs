use serde::Deserialize;
use serde_json::json;

use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::client::session::{Session, SessionUser};
use crate::database::models::UserSummary;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: UserSummary,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    token: String,
    data: UserSummary,
}

/// Login and registration. Both return a fresh `Session` for the same server;
/// the caller decides whether to persist it.
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let body = json!({ "email": email, "password": password });
        let response: LoginResponse = self
            .client
            .send_raw(reqwest::Method::POST, "/login", Some(&body))
            .await?;
        Ok(self.session_for(response.token, response.user))
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let response: RegisterResponse = self
            .client
            .send_raw(reqwest::Method::POST, "/register", Some(&body))
            .await?;
        Ok(self.session_for(response.token, response.data))
    }

    fn session_for(&self, token: String, user: UserSummary) -> Session {
        Session::authenticated(
            self.client.base_url(),
            token,
            SessionUser {
                id: user.id,
                name: user.name,
            },
        )
    }
}
