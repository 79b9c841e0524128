//! JSON response envelope shared by every endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

/// `{status_code, description, data}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub description: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// A 200 envelope.
    pub fn ok(description: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            description: description.into(),
            data,
        }
    }
}

/// Error returned by handlers; rendered as an envelope with `data: null`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl ToString) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    pub fn bad_request(message: impl ToString) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("no route for {path}"))
    }

    pub fn internal(message: impl ToString) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        if err.is_client_error() {
            Self::bad_request(err)
        } else {
            Self::internal(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), message = %self.message, "request failed");
        }
        let body = ApiResponse {
            status_code: self.status.as_u16(),
            description: self.message,
            data: serde_json::Value::Null,
        };
        (self.status, Json(body)).into_response()
    }
}
