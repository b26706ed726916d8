//! Event and attendee registration endpoints.

use axum::extract::State;
use std::sync::Arc;

use super::error::{ApiResponse, ApiResult};
use super::extract::{JsonBody, PathId};
use super::validation::validate_create_event;
use crate::auth::Identity;
use crate::db::{Event, EventRequest};
use crate::AppState;

pub async fn list_events(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Event>> {
    let events = state.events.list_events().await?;
    Ok(ApiResponse::success(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> ApiResult<Event> {
    let event = state.events.get_event(id).await?;
    Ok(ApiResponse::success(event))
}

pub async fn create_event(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<EventRequest>,
) -> ApiResult<Event> {
    let event = validate_create_event(req)?;
    let event = state.events.add_event(&identity, event).await?;
    Ok(ApiResponse::created(event))
}

/// Partial update; empty fields keep their stored values
pub async fn update_event(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(req): JsonBody<EventRequest>,
) -> ApiResult<Event> {
    let event = state.events.update_event(&identity, id, req).await?;
    Ok(ApiResponse::success(event))
}

pub async fn delete_event(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> ApiResult<()> {
    state.events.delete_event(&identity, id).await?;
    Ok(ApiResponse::success(()))
}

pub async fn register(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> ApiResult<()> {
    state.registrations.register(&identity, id).await?;
    Ok(ApiResponse::created(()))
}

pub async fn unregister(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> ApiResult<()> {
    state.registrations.unregister(&identity, id).await?;
    Ok(ApiResponse::success(()))
}

/// Emails of everyone registered; owner only
pub async fn list_attendees(
    identity: Identity,
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> ApiResult<Vec<String>> {
    let emails = state.registrations.attendee_emails(&identity, id).await?;
    Ok(ApiResponse::success(emails))
}
