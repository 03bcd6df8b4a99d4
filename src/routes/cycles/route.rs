use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use uuid::Uuid;

use super::dto::{CreateCycleRequest, CycleListResponse, CycleResponse, UpdateCycleRequest};
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::CycleRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/cycles", get(get_all_cycles).post(create_cycle))
        .route(
            "/api/v1/cycles/{cycle_id}",
            get(get_cycle).put(update_cycle).delete(delete_cycle),
        )
}

/// List evaluation cycles, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/cycles",
    responses(
        (status = 200, description = "Cycles retrieved", body = CycleListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cycles"
)]
pub async fn get_all_cycles(
    CurrentUser(_identity): CurrentUser,
) -> Result<(StatusCode, Json<CycleListResponse>), (StatusCode, String)> {
    let cycles = CycleRepository::new().find_all().await?;
    let response = CycleListResponse {
        total: cycles.len(),
        cycles: cycles.into_iter().map(Into::into).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get evaluation cycle by ID
#[utoipa::path(
    get,
    path = "/api/v1/cycles/{cycle_id}",
    params(("cycle_id" = Uuid, Path, description = "Cycle ID")),
    responses(
        (status = 200, description = "Cycle retrieved", body = CycleResponse),
        (status = 404, description = "Cycle not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cycles"
)]
pub async fn get_cycle(
    CurrentUser(_identity): CurrentUser,
    Path(cycle_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CycleResponse>), (StatusCode, String)> {
    let cycle = CycleRepository::new()
        .find_by_id(cycle_id)
        .await?
        .ok_or_else(|| AppError::not_found("Evaluation cycle"))?;
    Ok((StatusCode::OK, Json(cycle.into())))
}

/// Open a new evaluation cycle (master only)
#[utoipa::path(
    post,
    path = "/api/v1/cycles",
    request_body = CreateCycleRequest,
    responses(
        (status = 201, description = "Cycle created", body = CycleResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 422, description = "Invalid payload or end date before start date"),
        (status = 503, description = "Storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Cycles"
)]
pub async fn create_cycle(
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<CreateCycleRequest>,
) -> Result<(StatusCode, Json<CycleResponse>), (StatusCode, String)> {
    identity.require_master("create evaluation cycles")?;
    let new = payload.validate()?;
    let cycle = CycleRepository::new().create(new).await?;
    Ok((StatusCode::CREATED, Json(cycle.into())))
}

/// Update an evaluation cycle (master only)
#[utoipa::path(
    put,
    path = "/api/v1/cycles/{cycle_id}",
    params(("cycle_id" = Uuid, Path, description = "Cycle ID")),
    request_body = UpdateCycleRequest,
    responses(
        (status = 200, description = "Cycle updated", body = CycleResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Cycle not found"),
        (status = 422, description = "Invalid payload")
    ),
    security(("bearer_auth" = [])),
    tag = "Cycles"
)]
pub async fn update_cycle(
    CurrentUser(identity): CurrentUser,
    Path(cycle_id): Path<Uuid>,
    Json(payload): Json<UpdateCycleRequest>,
) -> Result<(StatusCode, Json<CycleResponse>), (StatusCode, String)> {
    identity.require_master("update evaluation cycles")?;
    let updates = payload.validate()?;
    let cycle = CycleRepository::new().update(cycle_id, updates).await?;
    Ok((StatusCode::OK, Json(cycle.into())))
}

/// Delete an evaluation cycle and its evaluations (master only)
#[utoipa::path(
    delete,
    path = "/api/v1/cycles/{cycle_id}",
    params(("cycle_id" = Uuid, Path, description = "Cycle ID")),
    responses(
        (status = 204, description = "Cycle deleted"),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Cycle not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cycles"
)]
pub async fn delete_cycle(
    CurrentUser(identity): CurrentUser,
    Path(cycle_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    identity.require_master("delete evaluation cycles")?;
    CycleRepository::new().delete(cycle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
