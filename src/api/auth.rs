//! Bearer authentication for protected handlers.
//!
//! Protected handlers take [`Identity`] as their first argument. A request
//! without a valid token is rejected with the `UNAUTHORIZED` envelope
//! before the handler body runs.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;

use super::error::ApiError;
use crate::auth::{parse_bearer, Identity};
use crate::AppState;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        let token = parse_bearer(header)?;
        Ok(state.tokens.verify(token)?)
    }
}
