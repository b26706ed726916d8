pub mod auth;
pub mod error;
mod events;
mod extract;
mod users;
pub mod validation;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;
use error::{ApiError, ResponseStatus};

pub fn create_router(state: Arc<AppState>) -> Router {
    // Per-handler auth: protected handlers extract `Identity`
    let user_routes = Router::new()
        .route("/", post(users::create_user).get(users::list_users))
        .route("/login", post(users::login))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let event_routes = Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route(
            "/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/:id/register",
            post(events::register).delete(events::unregister),
        )
        .route("/:id/attendees", get(events::list_attendees));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/events", event_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::from_status(ResponseStatus::DataNotFound)
}

/// A known path with an unrouted method answers like an unknown route
async fn method_not_allowed(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::from_status(ResponseStatus::DataNotFound).into_response();
    }
    response
}
