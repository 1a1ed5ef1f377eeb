//! System/health API handlers.
//!
//! # Purpose and responsibility
//! Provides a lightweight readiness endpoint for probes. It is outside the
//! access policy and needs no credentials.
use crate::api::error::{ApiError, api_internal};
use crate::api::types::HealthStatus;
use crate::app::AppState;
use axum::Json;
use axum::extract::State;

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Roster health", body = HealthStatus)
    )
)]
/// Return roster health status.
///
/// # Errors
/// - Returns 500 if the store health check fails.
pub(crate) async fn health(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    if let Err(err) = state.store.health_check().await {
        return Err(api_internal("storage unavailable", &err));
    }
    Ok(Json(HealthStatus {
        status: "ok".to_string(),
        backend: state.store.backend_name().to_string(),
    }))
}
