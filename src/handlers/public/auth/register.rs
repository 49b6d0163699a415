// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::app::AppState;
use crate::auth::{hash_password, is_valid_email, issue_token};
use crate::database::models::{NewUser, UserSummary};
use crate::database::store::EMAIL_TAKEN;
use crate::error::{ApiError, JsonBody};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/**
 * POST /register - Create an account and sign in
 *
 * Expected Input:
 * ```json
 * { "name": "Ada", "email": "ada@example.com", "password": "secret" }
 * ```
 *
 * Responds 201 with `{msg, token, data: {_id, name}}`. The email is stored
 * lowercased and must be unused; the password is bcrypt-hashed with the
 * configured cost.
 */
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let security = &state.config.security;

    let name = body.name.unwrap_or_default();
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_lowercase();
    let password = body.password.unwrap_or_default();

    let mut problems = Vec::new();
    if name.trim().is_empty() {
        problems.push("name: Name is required".to_string());
    }
    if !is_valid_email(&email) {
        problems.push("email: Please provide a valid email".to_string());
    }
    if password.chars().count() < security.min_password_length {
        problems.push(format!(
            "password: Password must be at least {} characters",
            security.min_password_length
        ));
    }
    if !problems.is_empty() {
        return Err(ApiError::validation(format!(
            "User validation failed: {}",
            problems.join(", ")
        )));
    }

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict(EMAIL_TAKEN));
    }

    let cost_config = security.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &cost_config))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            ApiError::internal_server_error("An error occurred while processing your request")
        })??;

    let user = state
        .store
        .insert_user(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;
    let token = issue_token(&user, security)?;
    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "msg": "User registered successfully",
            "token": token,
            "data": UserSummary::from(&user),
        })),
    ))
}
