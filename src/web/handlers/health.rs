//! Health check HTTP handler

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;

use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Reports healthy when the database answers a ping
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status_code, status) = match state.database.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!("Health check failed: {:#}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            database: state.database.database_type().as_str(),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
