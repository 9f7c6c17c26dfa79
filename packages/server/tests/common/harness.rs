//! Test harness that drives the real router in-process.
//!
//! Each test builds the full application over a throwaway data directory
//! and pushes requests through it with `tower::ServiceExt::oneshot`, so the
//! whole HTTP surface is exercised without binding a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use rsvp_core::domains::rsvp::store::ResponseStore;
use rsvp_core::server::build_app;
use rsvp_core::Config;

pub const TEST_ADMIN_PASSWORD: &str = "test-secret";

/// The application router over a throwaway data directory
pub struct TestApp {
    pub router: Router,
    data_dir: TempDir,
}

fn test_config(data_dir: &TempDir) -> Config {
    Config {
        port: 0,
        data_dir: data_dir.path().display().to_string(),
        admin_password: TEST_ADMIN_PASSWORD.to_string(),
        mirror_url: None,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp data dir");
        let config = test_config(&data_dir);
        let store = Arc::new(ResponseStore::open(&config.data_dir, None).await);
        Self {
            router: build_app(store, &config),
            data_dir,
        }
    }

    /// Rebuild the application over the same data directory, the way a
    /// process restart would
    pub async fn restart(self) -> Self {
        let config = test_config(&self.data_dir);
        let store = Arc::new(ResponseStore::open(&config.data_dir, None).await);
        Self {
            router: build_app(store, &config),
            data_dir: self.data_dir,
        }
    }

    /// Log in with the test password and return the session token
    pub async fn login(&self) -> String {
        let (status, body) = self
            .post_json(
                "/api/admin/login",
                json!({ "password": TEST_ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "Login should succeed: {:?}", body);
        body["token"]
            .as_str()
            .expect("Login response should carry a token")
            .to_string()
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_with_token(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// GET returning headers and the raw body, for the CSV export
    pub async fn get_raw(&self, path: &str, token: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request should not fail at the transport level");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body should be readable");
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request should not fail at the transport level");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

/// A complete, valid form body; tests tweak fields as needed
pub fn rsvp_form(email: &str, attendance: &str) -> Value {
    json!({
        "tower": "T1",
        "wing": "A",
        "floor": "3",
        "flatNumber": "2",
        "email": email,
        "attendance": attendance
    })
}
