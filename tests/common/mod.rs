#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header, request::Builder},
};
use folio::{AppState, config::Config};
use folio_contact::{ContactSessions, SimulatedSink};
use folio_content::Portfolio;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<ContactSessions>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(Config::default(), Portfolio::builtin().unwrap())
}

pub fn create_test_app_with(config: Config, content: Portfolio) -> TestApp {
    let sessions = ContactSessions::new(
        Arc::new(SimulatedSink::new(Duration::ZERO)),
        config.contact.session_limits(),
    );
    let state = AppState::new(config, content, sessions);
    let sessions = state.sessions.clone();

    TestApp {
        router: folio::routes::router(state),
        sessions,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn get(uri: &str) -> Builder {
    Request::builder().method("GET").uri(uri)
}

pub fn post(uri: &str) -> Builder {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
}

pub fn fragment(builder: Builder) -> Builder {
    builder.header("X-Fragment", "1")
}

pub fn with_cookie(builder: Builder, cookie: &str) -> Builder {
    builder.header(header::COOKIE, cookie)
}

pub fn form(builder: Builder, fields: &[(&str, &str)]) -> Request<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();

    builder.body(Body::from(body)).unwrap()
}

pub fn empty(builder: Builder) -> Request<Body> {
    builder.body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(body.to_vec()).unwrap()
}

/// `name=value` pair from the visitor cookie set by `response`, ready for a `Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("folio_contact="))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

pub const VALID: [(&str, &str); 3] = [
    ("name", "Jo"),
    ("email", "jo@example.com"),
    ("message", "Hello there, this is long enough."),
];
