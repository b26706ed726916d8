use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use eventbook::config::Config;
use eventbook::AppState;

async fn app() -> Router {
    let mut config = Config::default();
    config.auth.jwt_secret = Some("integration-secret".to_string());
    let db = eventbook::db::in_memory().await.unwrap();
    eventbook::api::create_router(Arc::new(AppState::new(config, db)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn signup(app: &Router, email: &str, role_id: Option<i64>) -> i64 {
    let mut body = json!({ "email": email, "password": "pw" });
    if let Some(role_id) = role_id {
        body["role_id"] = json!(role_id);
    }
    let (status, json) = send(app, Method::POST, "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["data"]["id"].as_i64().unwrap()
}

async fn login(app: &Router, email: &str) -> String {
    let (status, json) = send(
        app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({ "email": email, "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", json);
    json["data"].as_str().unwrap().to_string()
}

fn meetup() -> Value {
    json!({
        "name": "Rust meetup",
        "description": "Talks and pizza",
        "location": "Berlin",
        "event_time": "2030-05-01T18:30:00Z"
    })
}

#[tokio::test]
async fn test_booking_flow() {
    let app = app().await;

    let owner_id = signup(&app, "a@x.com", None).await;
    let owner = login(&app, "a@x.com").await;
    assert!(!owner.is_empty());

    let (status, json) = send(&app, Method::POST, "/api/events", Some(&owner), Some(meetup())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["response_key"], "SUCCESS");
    assert_eq!(json["data"]["user_id"].as_i64(), Some(owner_id));
    let event_id = json["data"]["id"].as_i64().unwrap();

    signup(&app, "b@x.com", None).await;
    let guest = login(&app, "b@x.com").await;
    let register = format!("/api/events/{}/register", event_id);

    let (status, json) = send(&app, Method::POST, &register, Some(&guest), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(json["data"].is_null());

    let (status, json) = send(&app, Method::POST, &register, Some(&guest), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["response_key"], "CONFLICT");

    let attendees = format!("/api/events/{}/attendees", event_id);
    let (status, json) = send(&app, Method::GET, &attendees, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!(["b@x.com"]));

    let (status, _) = send(&app, Method::GET, &attendees, Some(&guest), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, &register, Some(&guest), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &register, Some(&guest), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, &register, Some(&guest), None).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_user_payloads_hide_password() {
    let app = app().await;
    let (_, json) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "a@x.com", "password": "pw" })),
    )
    .await;

    let data = json["data"].as_object().unwrap();
    assert!(!data.contains_key("password"));
    assert!(!data.contains_key("password_hash"));
    assert_eq!(json["data"]["role_id"], 2);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = app().await;
    signup(&app, "a@x.com", None).await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "a@x.com", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["response_message"], "Email already used");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = app().await;
    signup(&app, "a@x.com", None).await;

    let unknown = send(
        &app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({ "email": "nobody@x.com", "password": "pw" })),
    )
    .await;
    let wrong = send(
        &app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let app = app().await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "not-an-email", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["response_key"], "INVALID_REQUEST");

    // Malformed JSON still answers with the envelope
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["response_key"], "INVALID_REQUEST");

    let (status, json) = send(&app, Method::GET, "/api/events/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["response_key"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_event_requires_all_fields() {
    let app = app().await;
    signup(&app, "a@x.com", None).await;
    let token = login(&app, "a@x.com").await;

    let mut body = meetup();
    body["event_time"] = json!("0001-01-01T00:00:00Z");
    let (status, _) = send(&app, Method::POST, "/api/events", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = meetup();
    body["location"] = json!("");
    let (status, _) = send(&app, Method::POST, "/api/events", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = app().await;

    let (status, json) = send(&app, Method::POST, "/api/events", None, Some(meetup())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["response_key"], "UNAUTHORIZED");
    assert!(json["data"].is_null());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/events",
        Some("not.a.token"),
        Some(meetup()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Credentials are checked before the body
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/events")
        .header(header::AUTHORIZATION, "Token abc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_is_admin_only() {
    let app = app().await;
    signup(&app, "root@x.com", Some(1)).await;
    signup(&app, "a@x.com", None).await;
    let admin = login(&app, "root@x.com").await;
    let member = login(&app, "a@x.com").await;

    let (status, _) = send(&app, Method::GET, "/api/users", Some(&member), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = send(&app, Method::GET, "/api/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_user_self_service() {
    let app = app().await;
    let me = signup(&app, "a@x.com", None).await;
    let other = signup(&app, "b@x.com", None).await;
    let token = login(&app, "a@x.com").await;

    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}", other), Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", me),
        Some(&token),
        Some(json!({ "email": "c@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["email"], "c@x.com");

    let (status, json) = send(&app, Method::DELETE, &format!("/api/users/{}", me), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].is_null());

    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}", me), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_event_ownership() {
    let app = app().await;
    signup(&app, "a@x.com", None).await;
    signup(&app, "b@x.com", None).await;
    let owner = login(&app, "a@x.com").await;
    let other = login(&app, "b@x.com").await;

    let (_, json) = send(&app, Method::POST, "/api/events", Some(&owner), Some(meetup())).await;
    let uri = format!("/api/events/{}", json["data"]["id"]);

    let (status, _) = send(&app, Method::PUT, &uri, Some(&other), Some(json!({ "name": "Hijacked" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Missing events are reported as missing, not as forbidden
    let (status, json) = send(&app, Method::DELETE, "/api/events/9999", Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["response_key"], "DATA_NOT_FOUND");

    let (status, json) = send(&app, Method::PUT, &uri, Some(&owner), Some(json!({ "name": "Renamed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Renamed");
    assert_eq!(json["data"]["location"], "Berlin");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_event_listing() {
    let app = app().await;
    let (status, json) = send(&app, Method::GET, "/api/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let app = app().await;
    let (status, json) = send(&app, Method::GET, "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["response_key"], "DATA_NOT_FOUND");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
