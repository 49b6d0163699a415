use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Parse a path id; anything but a UUID is a 400.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation(format!("Invalid id \"{}\"", raw)))
}

/// Collection routes (`/:userId`) only serve the caller's own records.
pub fn require_self(user: &AuthUser, raw_user_id: &str) -> Result<Uuid, ApiError> {
    let user_id = parse_id(raw_user_id)?;
    if user_id != user.id {
        return Err(ApiError::access_denied());
    }
    Ok(user_id)
}

/// A `user_id` sent in a body must name the caller.
pub fn require_body_owner(user: &AuthUser, user_id: Option<Uuid>) -> Result<(), ApiError> {
    match user_id {
        Some(id) if id != user.id => Err(ApiError::access_denied()),
        _ => Ok(()),
    }
}

/// Records owned by someone else are reported as missing.
pub fn owned<T>(
    record: Option<T>,
    owner: impl Fn(&T) -> Uuid,
    user: &AuthUser,
    not_found: &str,
) -> Result<T, ApiError> {
    record
        .filter(|r| owner(r) == user.id)
        .ok_or_else(|| ApiError::not_found(not_found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn caller() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn bad_ids_are_validation_errors() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid id \"not-a-uuid\"");
    }

    #[test]
    fn other_users_collections_are_forbidden() {
        let user = caller();
        assert_eq!(require_self(&user, &user.id.to_string()).unwrap(), user.id);
        let err = require_self(&user, &Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn foreign_records_look_missing() {
        let user = caller();
        let foreign = Some(Uuid::new_v4());
        let err = owned(foreign, |id| *id, &user, "Income not found").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(owned(Some(user.id), |id| *id, &user, "x").unwrap(), user.id);
    }
}
