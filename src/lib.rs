pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repository;
pub mod service;

pub use db::DbPool;

use config::Config;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::repository::{
    SqliteEventRepository, SqliteRegistrationRepository, SqliteUserRepository,
};
use crate::service::{EventService, RegistrationService, UserService};

pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub tokens: Arc<TokenService>,
    pub users: UserService,
    pub events: EventService,
    pub registrations: RegistrationService,
}

impl AppState {
    /// Wire the SQLite stores and services over one pool
    pub fn new(config: Config, db: DbPool) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.auth.secret_or_generate(),
            chrono::Duration::minutes(config.auth.token_ttl_minutes),
        ));

        let user_repo = Arc::new(SqliteUserRepository::new(db.clone()));
        let event_repo = Arc::new(SqliteEventRepository::new(db.clone()));
        let registration_repo = Arc::new(SqliteRegistrationRepository::new(db.clone()));

        Self {
            users: UserService::new(user_repo, tokens.clone()),
            events: EventService::new(event_repo.clone()),
            registrations: RegistrationService::new(event_repo, registration_repo),
            tokens,
            config,
            db,
        }
    }
}
