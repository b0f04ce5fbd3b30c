//! Health check routes
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /health | GET | Simple liveness check |
//! | /health/detailed | GET | Liveness plus a database round-trip |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::LazyLock;
use std::time::Instant;

use crate::core::ServerState;

static START: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Health check routes - public, no authentication
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (ok | error)
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    /// Uptime in seconds
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    /// Latency in milliseconds
    latency_ms: u128,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/detailed
pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let started = Instant::now();
    let db_ok = sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();
    let latency_ms = started.elapsed().as_millis();

    let database = CheckResult {
        status: if db_ok { "ok" } else { "error" },
        latency_ms,
    };

    Json(DetailedHealthResponse {
        status: if db_ok { "ok" } else { "error" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: START.elapsed().as_secs(),
        checks: HealthChecks { database },
    })
}
