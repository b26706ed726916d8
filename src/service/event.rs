use std::sync::Arc;

use tracing::info;

use super::policy::require_owner;
use crate::auth::Identity;
use crate::db::{is_zero_time, Event, EventRequest, NewEvent, UpsertEvent};
use crate::error::AppResult;
use crate::repository::EventRepository;

#[derive(Clone)]
pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// Create an event owned by the caller
    pub async fn add_event(&self, identity: &Identity, event: NewEvent) -> AppResult<Event> {
        let saved = self
            .repo
            .save(UpsertEvent {
                id: None,
                name: event.name,
                description: event.description,
                location: event.location,
                event_time: event.event_time,
                user_id: identity.user_id,
            })
            .await?;

        info!(event_id = saved.id, user_id = saved.user_id, "Event created");
        Ok(saved)
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.repo.find_all().await
    }

    pub async fn get_event(&self, id: i64) -> AppResult<Event> {
        self.repo.find_by_id(id).await
    }

    /// Overwrite the stored event with the non-empty, non-zero fields of `req`
    pub async fn update_event(
        &self,
        identity: &Identity,
        id: i64,
        req: EventRequest,
    ) -> AppResult<Event> {
        let mut event = self.repo.find_by_id(id).await?;
        require_owner(identity, &event)?;

        if let Some(name) = req.name.filter(|v| !v.is_empty()) {
            event.name = name;
        }
        if let Some(description) = req.description.filter(|v| !v.is_empty()) {
            event.description = description;
        }
        if let Some(location) = req.location.filter(|v| !v.is_empty()) {
            event.location = location;
        }
        if let Some(event_time) = req.event_time.filter(|t| !is_zero_time(t)) {
            event.event_time = event_time;
        }

        let saved = self.repo.save(event.into()).await?;
        info!(event_id = saved.id, "Event updated");
        Ok(saved)
    }

    pub async fn delete_event(&self, identity: &Identity, id: i64) -> AppResult<()> {
        let event = self.repo.find_by_id(id).await?;
        require_owner(identity, &event)?;

        self.repo.delete_by_id(id).await?;
        info!(event_id = id, "Event deleted");
        Ok(())
    }
}
