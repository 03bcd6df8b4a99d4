use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use super::dto::{
    NineBoxGridResponse, NineBoxListResponse, NineBoxQuery,
    NineBoxRequest, NineBoxResponse,
};
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::NineBoxRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/nine-box", get(get_all_nine_box))
        .route("/api/v1/nine-box/grid", get(get_nine_box_grid))
        .route(
            "/api/v1/evaluations/{evaluation_id}/nine-box",
            get(get_nine_box).put(upsert_nine_box).delete(delete_nine_box),
        )
}

/// List nine-box records
#[utoipa::path(
    get,
    path = "/api/v1/nine-box",
    params(NineBoxQuery),
    responses(
        (status = 200, description = "Records retrieved", body = NineBoxListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Nine Box"
)]
pub async fn get_all_nine_box(
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<NineBoxQuery>,
) -> Result<(StatusCode, Json<NineBoxListResponse>), (StatusCode, String)> {
    let records = NineBoxRepository::new().find_all(query.employee_id).await?;
    let response = NineBoxListResponse {
        total: records.len(),
        records: records.into_iter().map(Into::into).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Records grouped into the nine grid cells
#[utoipa::path(
    get,
    path = "/api/v1/nine-box/grid",
    params(NineBoxQuery),
    responses(
        (status = 200, description = "Grid retrieved", body = NineBoxGridResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Nine Box"
)]
pub async fn get_nine_box_grid(
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<NineBoxQuery>,
) -> Result<(StatusCode, Json<NineBoxGridResponse>), (StatusCode, String)> {
    let records = NineBoxRepository::new().find_all(query.employee_id).await?;
    Ok((StatusCode::OK, Json(NineBoxGridResponse::from_records(records))))
}

/// Nine-box record of an evaluation
#[utoipa::path(
    get,
    path = "/api/v1/evaluations/{evaluation_id}/nine-box",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Record retrieved", body = NineBoxResponse),
        (status = 404, description = "No record for this evaluation")
    ),
    security(("bearer_auth" = [])),
    tag = "Nine Box"
)]
pub async fn get_nine_box(
    CurrentUser(_identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
) -> Result<(StatusCode, Json<NineBoxResponse>), (StatusCode, String)> {
    let record = NineBoxRepository::new()
        .find_by_evaluation(evaluation_id)
        .await?
        .ok_or_else(|| AppError::not_found("Nine-box record"))?;
    Ok((StatusCode::OK, Json(record.into())))
}

/// Classify an evaluation on the grid, replacing any previous classification
#[utoipa::path(
    put,
    path = "/api/v1/evaluations/{evaluation_id}/nine-box",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    request_body = NineBoxRequest,
    responses(
        (status = 200, description = "Record saved", body = NineBoxResponse),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "Evaluation not found"),
        (status = 422, description = "Performance or potential outside 1..=3, or evaluation completed")
    ),
    security(("bearer_auth" = [])),
    tag = "Nine Box"
)]
pub async fn upsert_nine_box(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
    Json(payload): Json<NineBoxRequest>,
) -> Result<(StatusCode, Json<NineBoxResponse>), (StatusCode, String)> {
    identity.require_evaluator("classify evaluations")?;
    let record = NineBoxRepository::new()
        .upsert(evaluation_id, payload.into())
        .await?;
    Ok((StatusCode::OK, Json(record.into())))
}

/// Remove the nine-box record of an evaluation
#[utoipa::path(
    delete,
    path = "/api/v1/evaluations/{evaluation_id}/nine-box",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "No record for this evaluation"),
        (status = 422, description = "Evaluation completed")
    ),
    security(("bearer_auth" = [])),
    tag = "Nine Box"
)]
pub async fn delete_nine_box(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    identity.require_evaluator("remove nine-box records")?;
    NineBoxRepository::new().delete(evaluation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
