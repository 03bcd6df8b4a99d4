use axum::{Json, Router, http::StatusCode, routing::get};

use super::dto::DashboardStatsResponse;
use crate::extractor::CurrentUser;
use crate::repositories::DashboardRepository;

pub fn create_route() -> Router {
    Router::new().route("/api/v1/dashboard/stats", get(get_dashboard_stats))
}

/// Headcount, evaluation progress and latest activity
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses(
        (status = 200, description = "Statistics retrieved; zeros when storage is unavailable", body = DashboardStatsResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_dashboard_stats(
    CurrentUser(_identity): CurrentUser,
) -> Result<(StatusCode, Json<DashboardStatsResponse>), (StatusCode, String)> {
    let stats = DashboardRepository::new().stats().await?;
    Ok((StatusCode::OK, Json(stats.into())))
}
