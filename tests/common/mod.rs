#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use marketdash::marketdash_config::{CorsConfig, JwtConfig};
use marketdash::marketdash_core::PasswordHasher;
use marketdash::marketdash_db::MemoryStore;
use marketdash::marketdash_models::UserRole;
use marketdash::router::init_router;
use marketdash::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, Duration::from_secs(3600)).unwrap()
}

/// Lowest bcrypt cost so tests stay fast.
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(4)
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(
        store.clone(),
        store,
        &jwt_config(),
        fast_hasher(),
        CorsConfig::default(),
        Duration::from_secs(5),
    )
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = init_router(test_state(store.clone()));
        Self { router, store }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn register(&self, email: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/v1/register",
            None,
            Some(json!({
                "full_name": "Test User",
                "email": email,
                "password": TEST_PASSWORD,
            })),
        )
        .await
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/v1/login",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    /// Registers a fresh `user` account and returns its email and token.
    pub async fn signup(&self) -> (String, String) {
        let email = unique_email();
        let (status, body) = self.register(&email).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let token = self.login(&email).await;
        (email, token)
    }

    /// Registers an account, promotes it and logs in again so the token
    /// carries the admin role.
    pub async fn signup_admin(&self) -> (String, String) {
        let (email, _) = self.signup().await;
        self.store.set_role(&email, UserRole::Admin).unwrap();
        let token = self.login(&email).await;
        (email, token)
    }

    pub async fn create_campaign(&self, token: &str, title: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/v1/campaigns",
                Some(token),
                Some(campaign_body(title)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["data"].clone()
    }
}

pub fn campaign_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Launch week push",
        "start_date": "2025-03-01T00:00:00Z",
        "end_date": "2025-03-31T00:00:00Z",
        "budget": 1500.0,
    })
}

pub fn unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
