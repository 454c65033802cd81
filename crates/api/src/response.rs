//! Shared response envelope for API handlers.
//!
//! All API responses use the `{ success, message, timestamp, data? }`
//! envelope. Use [`ApiResponse`] instead of ad-hoc `serde_json::json!`
//! bodies to get compile-time type safety and consistent serialization.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use skilltrack_core::types::Timestamp;

/// Standard response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Build a success envelope with a payload, returned as HTTP 200.
    pub fn ok(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        Self::with_status(StatusCode::OK, message, data)
    }

    /// Build a success envelope with a payload, returned as HTTP 201.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    fn with_status(
        status: StatusCode,
        message: impl Into<String>,
        data: T,
    ) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                success: true,
                message: message.into(),
                timestamp: chrono::Utc::now(),
                data: Some(data),
            }),
        )
    }
}

impl ApiResponse<()> {
    /// Build a success envelope with no payload.
    pub fn message(message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                success: true,
                message: message.into(),
                timestamp: chrono::Utc::now(),
                data: None,
            }),
        )
    }
}

/// Build an error envelope (`success: false`, no data).
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ApiResponse::<()> {
        success: false,
        message: message.into(),
        timestamp: chrono::Utc::now(),
        data: None,
    });
    (status, body).into_response()
}
