//! Extractors whose rejections render as the `INVALID_REQUEST` envelope.

use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;

use super::error::ApiError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Numeric `:id` path segment
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathId(pub i64);
