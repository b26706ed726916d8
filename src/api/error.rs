//! Response envelope and API error handling.
//!
//! Every response, success or failure, is a JSON object of the form
//! `{"response_key": ..., "response_message": ..., "data": ...}` where the key
//! comes from the closed [`ResponseStatus`] taxonomy.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::AppError;

/// Status kinds reported in `response_key`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    InvalidRequest,
    Unauthorized,
    DataNotFound,
    Conflict,
    UnknownError,
}

impl ResponseStatus {
    /// Get the HTTP status code for this kind. Creation responses override
    /// `Success` with 201.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResponseStatus::Success => StatusCode::OK,
            ResponseStatus::InvalidRequest => StatusCode::BAD_REQUEST,
            ResponseStatus::Unauthorized => StatusCode::UNAUTHORIZED,
            ResponseStatus::DataNotFound => StatusCode::NOT_FOUND,
            ResponseStatus::Conflict => StatusCode::CONFLICT,
            ResponseStatus::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "SUCCESS",
            ResponseStatus::InvalidRequest => "INVALID_REQUEST",
            ResponseStatus::Unauthorized => "UNAUTHORIZED",
            ResponseStatus::DataNotFound => "DATA_NOT_FOUND",
            ResponseStatus::Conflict => "CONFLICT",
            ResponseStatus::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "Success",
            ResponseStatus::InvalidRequest => "Invalid Request",
            ResponseStatus::Unauthorized => "Unauthorized",
            ResponseStatus::DataNotFound => "Data Not Found",
            ResponseStatus::Conflict => "Conflict",
            ResponseStatus::UnknownError => "Unknown Error",
        }
    }
}

/// The wire envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub response_key: String,
    pub response_message: String,
    pub data: T,
}

/// A successful response carrying `data`
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with the given payload
    pub fn success(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 with the given payload
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = ResponseStatus::Success;
        let body = Envelope {
            response_key: status.as_str().to_string(),
            response_message: status.message().to_string(),
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// A failed response; always carries `data: null`
#[derive(Debug)]
pub struct ApiError {
    status: ResponseStatus,
    message: String,
}

impl ApiError {
    pub fn new(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// An error with the kind's default message
    pub fn from_status(status: ResponseStatus) -> Self {
        Self::new(status, status.message())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ResponseStatus::InvalidRequest, message)
    }

    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope {
            response_key: self.status.as_str().to_string(),
            response_message: self.message,
            data: serde_json::Value::Null,
        };
        (self.status.status_code(), Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

// -------------------------------------------------------------------------
// Conversions
// -------------------------------------------------------------------------

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidRequest(msg) => Self::new(ResponseStatus::InvalidRequest, msg),
            // Both collapse to one wire status
            AppError::Unauthenticated(msg) | AppError::Forbidden(msg) => {
                Self::new(ResponseStatus::Unauthorized, msg)
            }
            AppError::NotFound(msg) => Self::new(ResponseStatus::DataNotFound, msg),
            AppError::Conflict(msg) => Self::new(ResponseStatus::Conflict, msg),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                Self::from_status(ResponseStatus::UnknownError)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Self::from_status(ResponseStatus::UnknownError)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::invalid_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        Self::invalid_request("Invalid id")
    }
}

// -------------------------------------------------------------------------
// Builder for validation errors
// -------------------------------------------------------------------------

/// Collects validation failures in the order they are found
#[derive(Debug, Default)]
pub struct ValidationErrorBuilder {
    errors: Vec<(String, String)>,
}

impl ValidationErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation error for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.push((field.into(), message.into()));
        self
    }

    /// One `InvalidRequest` error whose message joins every failure
    pub fn build(self) -> Option<ApiError> {
        if self.errors.is_empty() {
            return None;
        }
        let message = self
            .errors
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join("; ");
        Some(ApiError::invalid_request(message))
    }

    /// Return Ok(()) if no errors, or Err(ApiError) if there are errors
    pub fn finish(self) -> Result<(), ApiError> {
        match self.build() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
