//! Event models and request DTOs.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub event_time: DateTime<Utc>,
    /// Owner; set from the creating identity and never rewritten
    pub user_id: i64,
}

/// An event to be written by the event store.
///
/// `id: None` inserts a new row; `Some(id)` replaces the mutable columns of
/// that row.
#[derive(Debug, Clone)]
pub struct UpsertEvent {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub location: String,
    pub event_time: DateTime<Utc>,
    pub user_id: i64,
}

impl From<Event> for UpsertEvent {
    fn from(event: Event) -> Self {
        Self {
            id: Some(event.id),
            name: event.name,
            description: event.description,
            location: event.location,
            event_time: event.event_time,
            user_id: event.user_id,
        }
    }
}

/// Validated input for a new event; the owner comes from the caller's identity
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub location: String,
    pub event_time: DateTime<Utc>,
}

/// Body of create and update requests.
///
/// Any owner supplied by the client is ignored: the struct has no field for
/// it.
#[derive(Debug, Default, Deserialize)]
pub struct EventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_time: Option<DateTime<Utc>>,
}

/// True for the all-zero instant `0001-01-01T00:00:00Z`, which clients send
/// to mean "no time given".
pub fn is_zero_time(t: &DateTime<Utc>) -> bool {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .map_or(false, |zero| *t == zero)
}
