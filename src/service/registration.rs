use std::sync::Arc;

use tracing::info;

use super::policy::require_owner;
use crate::auth::Identity;
use crate::db::NewRegistration;
use crate::error::AppResult;
use crate::repository::{EventRepository, RegistrationRepository};

/// Attendance: registering, unregistering and the owner's attendee list
#[derive(Clone)]
pub struct RegistrationService {
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegistrationService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            events,
            registrations,
        }
    }

    pub async fn register(&self, identity: &Identity, event_id: i64) -> AppResult<()> {
        let event = self.events.find_by_id(event_id).await?;
        self.registrations
            .save(NewRegistration {
                event_id: event.id,
                user_id: identity.user_id,
            })
            .await?;

        info!(event_id, user_id = identity.user_id, "Registered for event");
        Ok(())
    }

    /// Removing a registration that does not exist succeeds
    pub async fn unregister(&self, identity: &Identity, event_id: i64) -> AppResult<()> {
        self.registrations.delete(event_id, identity.user_id).await?;
        info!(event_id, user_id = identity.user_id, "Unregistered from event");
        Ok(())
    }

    pub async fn attendee_emails(
        &self,
        identity: &Identity,
        event_id: i64,
    ) -> AppResult<Vec<String>> {
        let event = self.events.find_by_id(event_id).await?;
        require_owner(identity, &event)?;
        self.registrations.find_attendee_emails(event.id).await
    }
}
