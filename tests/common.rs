#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use fitlog::client::{ApiClient, Navigator, RecordingNavigator};
use fitlog::config::ConfigV1;
use fitlog::metrics::Metrics;
use fitlog::routes::create_router;
use fitlog::session::memory_storage::MemoryStorage;
use fitlog::session::{CookiePolicy, MemoryCookieJar, SessionStore};
use fitlog::state::AppState;

/// Default config pointed at a mock backend.
pub fn test_config(base_url: &str) -> ConfigV1 {
    let mut config = ConfigV1::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_in_ms = 3000;
    config
}

pub fn memory_session() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(MemoryCookieJar::new()),
        CookiePolicy::default(),
    ))
}

pub fn signed_in_session(access: &str, refresh: &str) -> Arc<SessionStore> {
    let session = memory_session();
    session.set_tokens(access, refresh);
    session
}

pub struct TestClient {
    pub client: ApiClient,
    pub navigator: Arc<RecordingNavigator>,
    pub metrics: Metrics,
}

pub fn build_client(base_url: &str, session: Arc<SessionStore>) -> TestClient {
    let navigator = Arc::new(RecordingNavigator::new());
    let metrics = Metrics::new();
    let client = ApiClient::new(
        &test_config(base_url),
        session,
        navigator.clone() as Arc<dyn Navigator>,
        metrics.clone(),
    )
    .expect("client should build");
    TestClient {
        client,
        navigator,
        metrics,
    }
}

pub fn build_app(config: ConfigV1) -> (Router, Metrics) {
    let metrics = Metrics::new();
    let state = AppState::new(Arc::new(config), metrics.clone());
    (create_router(state), metrics)
}

pub fn page_request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn user_json(with_profile: bool) -> String {
    let profile = if with_profile {
        r#", "profile": {"name": "Ana", "age": 31, "gender": "female", "height": 168.0,
             "weight": 64.5, "goal": "cut", "target_calories": 1800}"#
    } else {
        ""
    };
    format!(
        r#"{{"id": "u1", "email": "ana@example.com", "name": "Ana",
            "created_at": "2024-05-01T10:00:00"{}}}"#,
        profile
    )
}

pub fn token_json(access: &str, refresh: &str) -> String {
    format!(
        r#"{{"access_token": "{}", "refresh_token": "{}", "token_type": "bearer"}}"#,
        access, refresh
    )
}
