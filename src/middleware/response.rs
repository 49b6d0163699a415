use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Success envelope: `{"msg": ..., "data": ...}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub msg: String,
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn success(msg: impl Into<String>, data: T) -> Self {
        Self {
            msg: msg.into(),
            data,
            status_code: None,
        }
    }

    pub fn with_status(msg: impl Into<String>, data: T, status_code: StatusCode) -> Self {
        Self {
            msg: msg.into(),
            data,
            status_code: Some(status_code),
        }
    }

    /// 201 Created
    pub fn created(msg: impl Into<String>, data: T) -> Self {
        Self::with_status(msg, data, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "msg": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "msg": self.msg, "data": data_value }))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
