use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{ScorePreviewRequest, ScorePreviewResponse};
use crate::domain::ScoreSheet;
use crate::errors::AppError;
use crate::extractor::CurrentUser;

pub fn create_route() -> Router {
    Router::new().route("/api/v1/scoring/preview", post(preview_scores))
}

/// Compute weighted values and the total without saving anything
#[utoipa::path(
    post,
    path = "/api/v1/scoring/preview",
    request_body = ScorePreviewRequest,
    responses(
        (status = 200, description = "Sheet computed; check is_complete before submitting", body = ScorePreviewResponse),
        (status = 422, description = "Out of range weight or rating, or duplicated competency")
    ),
    security(("bearer_auth" = [])),
    tag = "Scoring"
)]
pub async fn preview_scores(
    CurrentUser(_identity): CurrentUser,
    Json(payload): Json<ScorePreviewRequest>,
) -> Result<(StatusCode, Json<ScorePreviewResponse>), (StatusCode, String)> {
    let sheet = ScoreSheet::compute(&payload.entries).map_err(AppError::from)?;
    Ok((StatusCode::OK, Json(sheet.into())))
}
