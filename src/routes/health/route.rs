use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::repositories::Store;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub version: &'static str,
}

pub fn create_route() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/health", get(health))
}

/// Liveness probe, reports whether storage is attached
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    let storage = if Store::global().is_connected() {
        "connected"
    } else {
        "unavailable"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            storage,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
