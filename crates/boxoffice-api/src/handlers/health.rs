//! Health check handlers.

use std::future::Future;

use axum::Json;
use axum::extract::State;

use boxoffice_core::result::AppResult;

use crate::dto::response::{ApiResponse, ComponentHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let (store, gate) = tokio::join!(
        probe(state.store.name(), state.store.health_check()),
        probe(state.gate.name(), state.gate.health_check()),
    );
    let status = if store.status == "up" && gate.status == "up" {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        store,
        gate,
        hub: state.hub.metrics().snapshot(),
    }))
}

async fn probe(backend: &str, check: impl Future<Output = AppResult<bool>>) -> ComponentHealth {
    let (status, error) = match check.await {
        Ok(true) => ("up", None),
        Ok(false) => ("down", None),
        Err(e) => ("down", Some(e.message)),
    };
    ComponentHealth {
        backend: backend.to_string(),
        status: status.to_string(),
        error,
    }
}
