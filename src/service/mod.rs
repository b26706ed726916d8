//! Business rules: authorization decisions and orchestration over the
//! store access layer.
//!
//! Every operation is a single load, check, mutate, persist sequence.
//! Typed errors from the stores pass through unchanged.

mod event;
pub mod policy;
mod registration;
mod user;

pub use event::EventService;
pub use registration::RegistrationService;
pub use user::UserService;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    use super::{EventService, RegistrationService, UserService};
    use crate::auth::{Identity, TokenService};
    use crate::db::{self, CreateUserRequest, NewEvent, RoleId};
    use crate::repository::{
        SqliteEventRepository, SqliteRegistrationRepository, SqliteUserRepository,
    };

    pub struct Services {
        pub users: UserService,
        pub events: EventService,
        pub registrations: RegistrationService,
    }

    pub async fn services() -> Services {
        let pool = db::in_memory().await.unwrap();
        let users = Arc::new(SqliteUserRepository::new(pool.clone()));
        let events = Arc::new(SqliteEventRepository::new(pool.clone()));
        let registrations = Arc::new(SqliteRegistrationRepository::new(pool));
        let tokens = Arc::new(TokenService::new("test-secret", Duration::hours(2)));

        Services {
            users: UserService::new(users, tokens),
            events: EventService::new(events.clone()),
            registrations: RegistrationService::new(events, registrations),
        }
    }

    pub async fn member(services: &Services, email: &str) -> Identity {
        let user = services
            .users
            .add_user(CreateUserRequest {
                email: email.to_string(),
                password: "pw".to_string(),
                role_id: None,
            })
            .await
            .unwrap();
        Identity {
            user_id: user.id,
            role_id: user.role_id,
        }
    }

    pub async fn admin(services: &Services, email: &str) -> Identity {
        let user = services
            .users
            .add_user(CreateUserRequest {
                email: email.to_string(),
                password: "pw".to_string(),
                role_id: Some(RoleId::ADMIN),
            })
            .await
            .unwrap();
        Identity {
            user_id: user.id,
            role_id: user.role_id,
        }
    }

    pub fn meetup() -> NewEvent {
        NewEvent {
            name: "Rust meetup".to_string(),
            description: "Talks and pizza".to_string(),
            location: "Berlin".to_string(),
            event_time: Utc.with_ymd_and_hms(2030, 5, 1, 18, 30, 0).unwrap(),
        }
    }
}
