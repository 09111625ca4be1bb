//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use popcorn_core::caller::ManagerRoles;
use popcorn_core::rng::DeterministicRng;
use popcorn_initiative::domain::manager::InitiativeManager;
use popcorn_test_support::MockRng;
use tower::ServiceExt;

use popcorn_api::extract::{ACTOR_ID_HEADER, ACTOR_ROLES_HEADER};
use popcorn_api::routes;
use popcorn_api::state::AppState;

/// Roles header value for a game master.
pub const GM: &str = "GM";

/// Roles header value for an ordinary player.
pub const PLAYER: &str = "Player";

/// Build the full app router with a `MockRng`, so random picks land on
/// the first candidate. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> (Router, AppState) {
    build_test_app_with_rng(MockRng)
}

/// Build the full app router with a custom random source.
pub fn build_test_app_with_rng(rng: impl DeterministicRng + 'static) -> (Router, AppState) {
    let app_state = AppState::new(
        InitiativeManager::new(Box::new(rng)),
        ManagerRoles::default(),
    );

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/channels", routes::channels::router())
        .with_state(app_state.clone());

    (app, app_state)
}

/// Send a request as `actor_id` holding `roles` and return the status and
/// JSON body (`Null` for empty bodies).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor_id: u64,
    roles: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(ACTOR_ID_HEADER, actor_id.to_string())
        .header(ACTOR_ROLES_HEADER, roles);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a GET request without caller headers and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
