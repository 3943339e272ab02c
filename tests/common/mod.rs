//! Shared helpers for integration tests: an in-memory backed router, token minting
//! and request plumbing.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use taskboard_core::config::TaskboardConfig;
use taskboard_core::database::InMemoryTaskStore;
use taskboard_core::models::OwnerId;
use taskboard_core::web::{create_app, AppState, JwtVerifier};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryTaskStore>,
    pub verifier: JwtVerifier,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = TaskboardConfig::default();
        config.environment = "test".to_string();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.auth.leeway_seconds = 0;
        Self::with_config(config)
    }

    pub fn with_config(config: TaskboardConfig) -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let verifier = JwtVerifier::from_config(&config.auth).expect("test secret is set");
        let state = AppState::with_verifier(config, store.clone(), Arc::new(verifier.clone()));

        Self {
            router: create_app(state),
            store,
            verifier,
        }
    }

    /// A fresh user and a valid token for them
    pub fn user(&self) -> (OwnerId, String) {
        let owner = OwnerId(Uuid::new_v4());
        let token = self
            .verifier
            .issue_token(owner, Duration::hours(1))
            .expect("token should sign");
        (owner, token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    /// Create a task and return its JSON record, asserting success
    pub async fn create(&self, token: &str, body: Value) -> Value {
        let (status, json) = self
            .request(Method::POST, "/api/tasks", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
        json["data"].clone()
    }
}

/// Titles of a list response, in order
pub fn titles(response: &Value) -> Vec<String> {
    response["data"]
        .as_array()
        .map(|tasks| {
            tasks
                .iter()
                .filter_map(|task| task["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
