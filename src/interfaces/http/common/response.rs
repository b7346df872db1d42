use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{CommonErrorCode, DomainError, ErrorCode};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Request completed successfully";
pub const VALIDATION_FAILED_MESSAGE: &str = "One or more validation errors occurred.";

/// Success envelope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, Some(data), message)
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::CREATED, Some(data), message)
    }

    /// Envelope without payload
    pub fn message(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, None, message)
    }

    fn with_status(status: StatusCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code: status.as_u16(),
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Error envelope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub status_code: u16,
    pub error_code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, Vec<String>>>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn from_code(code: ErrorCode, details: Option<String>) -> Self {
        Self {
            success: false,
            status_code: code.http_status(),
            error_code: code.as_i32(),
            message: code.message().to_string(),
            details,
            validation_errors: None,
            timestamp: Utc::now(),
        }
    }

    /// Field name -> messages, from request body validation
    pub fn validation(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            message: VALIDATION_FAILED_MESSAGE.to_string(),
            validation_errors: Some(errors),
            ..Self::from_code(CommonErrorCode::ValidationError.into(), None)
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Domain error on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let DomainError { code, details } = self.0;
        if code.http_status() >= 500 {
            error!(error_code = code.as_i32(), details = ?details, "Request failed");
        }
        ErrorResponse::from_code(code, details).into_response()
    }
}
