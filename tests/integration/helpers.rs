//! Shared test helpers for integration tests.
//!
//! The app is assembled exactly as the server does it, but over the
//! in-process store and gate.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use boxoffice_cache::LockGate;
use boxoffice_cache::memory::MemoryLockGate;
use boxoffice_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, GateConfig, LoggingConfig, RealtimeConfig,
    ReservationConfig, ServerConfig,
};
use boxoffice_database::store::{MemoryResourceStore, ResourceStore};
use boxoffice_entity::seat::CreateSeat;
use boxoffice_realtime::{HubHandle, NotificationHub};

pub const JWT_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for direct inspection
    pub store: Arc<MemoryResourceStore>,
    /// Gate behind the router
    pub gate: Arc<MemoryLockGate>,
    /// Hub behind the router
    pub hub: HubHandle,
}

impl TestApp {
    /// App over an empty store.
    pub async fn new() -> Self {
        Self::with_store(MemoryResourceStore::new()).await
    }

    /// App over an empty store with seats `A1..A{n}` created.
    pub async fn with_seats(n: i32) -> Self {
        let app = Self::new().await;
        for seat_number in 1..=n {
            app.store
                .create_seat(CreateSeat {
                    row_number: "A".to_string(),
                    seat_number,
                    price: 1500,
                })
                .await
                .expect("Failed to create seat");
        }
        app
    }

    pub async fn with_store(store: MemoryResourceStore) -> Self {
        let config = test_config();
        let store = Arc::new(store);
        let gate = Arc::new(MemoryLockGate::new());
        let (hub, _task) = NotificationHub::spawn(&config.realtime);

        let state = boxoffice_api::AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn ResourceStore>,
            Arc::clone(&gate) as Arc<dyn LockGate>,
            hub.clone(),
        );
        let router = boxoffice_api::build_app(state);

        Self {
            router,
            store,
            gate,
            hub,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            retry_after,
        }
    }

    /// Book `seat_id` as `user_id`.
    pub async fn book(&self, seat_id: i32, user_id: i32) -> TestResponse {
        let token = token_for(user_id);
        self.request(
            "POST",
            "/api/bookings",
            Some(json!({ "seat_id": seat_id })),
            Some(&token),
        )
        .await
    }
}

/// Test response wrapper
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `Retry-After` header, if any
    pub retry_after: Option<String>,
}

/// A valid token for `user_id`, expiring in an hour.
pub fn token_for(user_id: i32) -> String {
    sign(json!({ "user_id": user_id, "exp": now() + 3600 }), JWT_SECRET)
}

pub fn sign(claims: Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused/boxoffice".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 60,
            max_lifetime_seconds: 600,
        },
        gate: GateConfig {
            provider: "memory".to_string(),
            ..GateConfig::default()
        },
        reservation: ReservationConfig::default(),
        realtime: RealtimeConfig::default(),
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            leeway_seconds: 0,
        },
        logging: LoggingConfig::default(),
    }
}
