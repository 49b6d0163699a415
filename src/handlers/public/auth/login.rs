// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::app::AppState;
use crate::auth::{issue_token, verify_password};
use crate::database::models::UserSummary;
use crate::error::{ApiError, JsonBody};

const BAD_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/**
 * POST /login - Exchange credentials for a token
 *
 * Expected Input:
 * ```json
 * { "email": "ada@example.com", "password": "secret" }
 * ```
 *
 * Expected Output:
 * ```json
 * {
 *   "msg": "Login successful",
 *   "token": "eyJhbGciOiJIUzI1NiI...",
 *   "user": { "_id": "uuid", "name": "Ada" }
 * }
 * ```
 *
 * Errors: 400 when a field is missing, 401 when the email is unknown or the
 * password does not match. Both 401 cases share one message.
 */
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    let password = body.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let Some(user) = state.store.find_user_by_email(email).await? else {
        warn!("Login failed: unknown email");
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    };

    let hash = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            tracing::error!("Password check task failed: {}", e);
            ApiError::internal_server_error("An error occurred while processing your request")
        })?;
    if !matches {
        warn!("Login failed for user {}", user.id);
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    let token = issue_token(&user, &state.config.security)?;
    info!("User {} logged in", user.id);

    Ok(Json(json!({
        "msg": "Login successful",
        "token": token,
        "user": UserSummary::from(&user),
    })))
}
