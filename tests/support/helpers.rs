// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use store_locator::application::dto::Actor;
use store_locator::application::ports::{time::Clock, util::SlugGenerator};
use store_locator::application::queries::stores::DEFAULT_NEAR_MAX_DISTANCE_METERS;
use store_locator::application::services::{ApplicationServices, Repositories};
use store_locator::domain::user::UserId;
use store_locator::infrastructure::repositories::InMemoryStore;
use store_locator::infrastructure::util::DefaultSlugGenerator;
use store_locator::presentation::http::extractors::USER_ID_HEADER;
use store_locator::presentation::http::{routes::build_router, state::HttpState};

use super::mocks::DummyClock;

pub fn memory_repositories() -> Repositories {
    InMemoryStore::new().into_repositories()
}

pub fn build_services(repos: Repositories) -> Arc<ApplicationServices> {
    let clock: Arc<dyn Clock> = Arc::new(DummyClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    Arc::new(ApplicationServices::new(
        repos,
        clock,
        slugger,
        DEFAULT_NEAR_MAX_DISTANCE_METERS,
    ))
}

pub fn build_test_state() -> HttpState {
    HttpState {
        services: build_services(memory_repositories()),
    }
}

pub fn make_test_router() -> axum::Router {
    build_router(build_test_state(), &["http://localhost:3000".to_string()])
}

pub fn actor(id: i64) -> Actor {
    Actor::new(UserId::new(id).expect("positive user id"))
}

pub fn json_request(method: &str, uri: &str, user: Option<i64>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str, user: Option<i64>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = read_json(resp).await;
    let err_field = json.get("error").and_then(Value::as_str).unwrap_or("");
    let msg_field = json.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
