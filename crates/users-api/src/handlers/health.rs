//! Health check handlers
//!
//! Endpoints for the service banner plus liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use users_service::{HealthResponse, ReadinessResponse, ServiceBanner};

use crate::state::AppState;

/// Service banner
///
/// GET /
pub async fn index(State(state): State<AppState>) -> Json<ServiceBanner> {
    Json(ServiceBanner::running(state.config().app.name.clone()))
}

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    // Check database connectivity
    let db_healthy = state
        .service_context()
        .pool()
        .acquire()
        .await
        .map(|_| true)
        .unwrap_or(false);

    let response = ReadinessResponse::ready(db_healthy);
    let status = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
