use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use super::dto::{PdiListResponse, PdiQuery, PdiRequest, PdiResponse};
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::PdiRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/pdis", get(get_all_pdis))
        .route(
            "/api/v1/evaluations/{evaluation_id}/pdi",
            get(get_pdi).put(upsert_pdi).delete(delete_pdi),
        )
}

/// List individual development plans
#[utoipa::path(
    get,
    path = "/api/v1/pdis",
    params(PdiQuery),
    responses(
        (status = 200, description = "Plans retrieved", body = PdiListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "PDI"
)]
pub async fn get_all_pdis(
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<PdiQuery>,
) -> Result<(StatusCode, Json<PdiListResponse>), (StatusCode, String)> {
    let pdis = PdiRepository::new().find_all(query.employee_id).await?;
    let response = PdiListResponse {
        total: pdis.len(),
        pdis: pdis.into_iter().map(Into::into).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/evaluations/{evaluation_id}/pdi",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Plan retrieved", body = PdiResponse),
        (status = 404, description = "No plan for this evaluation")
    ),
    security(("bearer_auth" = [])),
    tag = "PDI"
)]
pub async fn get_pdi(
    CurrentUser(_identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
) -> Result<(StatusCode, Json<PdiResponse>), (StatusCode, String)> {
    let pdi = PdiRepository::new()
        .find_by_evaluation(evaluation_id)
        .await?
        .ok_or_else(|| AppError::not_found("PDI"))?;
    Ok((StatusCode::OK, Json(pdi.into())))
}

/// Create or replace the development plan of an evaluation
#[utoipa::path(
    put,
    path = "/api/v1/evaluations/{evaluation_id}/pdi",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    request_body = PdiRequest,
    responses(
        (status = 200, description = "Plan saved", body = PdiResponse),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "Evaluation not found"),
        (status = 422, description = "Invalid payload or evaluation completed")
    ),
    security(("bearer_auth" = [])),
    tag = "PDI"
)]
pub async fn upsert_pdi(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
    Json(payload): Json<PdiRequest>,
) -> Result<(StatusCode, Json<PdiResponse>), (StatusCode, String)> {
    identity.require_evaluator("write development plans")?;
    let input = payload.validate()?;
    let pdi = PdiRepository::new().upsert(evaluation_id, input).await?;
    Ok((StatusCode::OK, Json(pdi.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/evaluations/{evaluation_id}/pdi",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "No plan for this evaluation"),
        (status = 422, description = "Evaluation completed")
    ),
    security(("bearer_auth" = [])),
    tag = "PDI"
)]
pub async fn delete_pdi(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    identity.require_evaluator("remove development plans")?;
    PdiRepository::new().delete(evaluation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
