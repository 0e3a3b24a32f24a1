//! Handler for health check endpoint.

use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports whether the storage backend answers.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: storage reachable
/// - **503 Service Unavailable**: storage failed or timed out
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "latency_ms": 1 }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = probe_database(&state).await;

    let (code, status) = if database.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database },
    };

    (code, Json(response))
}

async fn probe_database(state: &AppState) -> CheckStatus {
    let started = Instant::now();
    let result = state.link_service.ping().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(()) => CheckStatus {
            status: "ok",
            latency_ms,
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed to reach storage");
            CheckStatus {
                status: "error",
                latency_ms,
                message: Some(e.to_string()),
            }
        }
    }
}
