/// Common test utilities for integration tests
///
/// Provides a TestContext that wires the router to in-memory collections
/// with a fixed signing secret and a low hash cost, plus request helpers
/// used across the suite.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, AuthConfig, Config, JwtConfig, StorageConfig};
use taskdeck_shared::models::{task::Task, user::User};
use taskdeck_shared::store::{CredentialStore, InMemory, TaskStore};
use tower::ServiceExt;

/// Signing secret shared between the test router and locally minted tokens
pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context holding a router backed by in-memory collections
pub struct TestContext {
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a fresh context with empty stores
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
            },
            storage: StorageConfig {
                data_dir: std::env::temp_dir(),
            },
            // bcrypt minimum cost keeps the suite fast
            auth: AuthConfig { hash_cost: 4 },
        };

        let users = CredentialStore::with_cost(Arc::new(InMemory::<User>::new()), 4);
        let tasks = TaskStore::new(Arc::new(InMemory::<Task>::new()));

        Self {
            app: build_router(AppState::new(users, tasks, config)),
        }
    }

    /// Sends a request and returns status plus parsed JSON body
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("authorization", token);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Registers a user, returning the response status
    pub async fn register(&self, username: &str, password: &str) -> StatusCode {
        let (status, _) = self
            .request(
                "POST",
                "/register",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        status
    }

    /// Logs a user in and returns the issued token
    ///
    /// Panics if login does not succeed; register the user first.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token in response").to_string()
    }

    /// Creates a task as the given token's user, returning the task body
    pub async fn create_task(&self, token: &str, body: serde_json::Value) -> serde_json::Value {
        let (status, task) = self.request("POST", "/tasks", Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", task);
        task
    }
}
