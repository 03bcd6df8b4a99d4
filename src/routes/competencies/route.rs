use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use super::dto::{
    CompetencyListResponse, CompetencyQuery, CompetencyResponse, CreateCompetencyRequest,
    UpdateCompetencyRequest,
};
use crate::entities::sea_orm_active_enums::CompetencyCategory;
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::CompetencyRepository;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/competencies",
            get(get_all_competencies).post(create_competency),
        )
        .route(
            "/api/v1/competencies/{competency_id}",
            get(get_competency)
                .put(update_competency)
                .delete(delete_competency),
        )
}

/// List competencies, optionally of one category
#[utoipa::path(
    get,
    path = "/api/v1/competencies",
    params(CompetencyQuery),
    responses(
        (status = 200, description = "Competencies retrieved", body = CompetencyListResponse),
        (status = 422, description = "Unknown category")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn get_all_competencies(
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<CompetencyQuery>,
) -> Result<(StatusCode, Json<CompetencyListResponse>), (StatusCode, String)> {
    let category = query
        .category
        .as_deref()
        .map(|label| {
            CompetencyCategory::from_label(label)
                .ok_or_else(|| AppError::validation(format!("Unknown category '{label}'")))
        })
        .transpose()?;

    let competencies = CompetencyRepository::new().find_all(category).await?;
    Ok((StatusCode::OK, Json(competencies.into())))
}

/// Get competency by ID
#[utoipa::path(
    get,
    path = "/api/v1/competencies/{competency_id}",
    params(("competency_id" = Uuid, Path, description = "Competency ID")),
    responses(
        (status = 200, description = "Competency retrieved", body = CompetencyResponse),
        (status = 404, description = "Competency not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn get_competency(
    CurrentUser(_identity): CurrentUser,
    Path(competency_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CompetencyResponse>), (StatusCode, String)> {
    let competency = CompetencyRepository::new()
        .find_by_id(competency_id)
        .await?
        .ok_or_else(|| AppError::not_found("Competency"))?;
    Ok((StatusCode::OK, Json(competency.into())))
}

/// Create a competency (master only)
#[utoipa::path(
    post,
    path = "/api/v1/competencies",
    request_body = CreateCompetencyRequest,
    responses(
        (status = 201, description = "Competency created", body = CompetencyResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 422, description = "Invalid payload"),
        (status = 503, description = "Storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn create_competency(
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<CreateCompetencyRequest>,
) -> Result<(StatusCode, Json<CompetencyResponse>), (StatusCode, String)> {
    identity.require_master("create competencies")?;
    let new = payload.validate()?;
    let competency = CompetencyRepository::new().create(new).await?;
    Ok((StatusCode::CREATED, Json(competency.into())))
}

/// Update a competency (master only)
#[utoipa::path(
    put,
    path = "/api/v1/competencies/{competency_id}",
    params(("competency_id" = Uuid, Path, description = "Competency ID")),
    request_body = UpdateCompetencyRequest,
    responses(
        (status = 200, description = "Competency updated", body = CompetencyResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Competency not found"),
        (status = 422, description = "Invalid payload")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn update_competency(
    CurrentUser(identity): CurrentUser,
    Path(competency_id): Path<Uuid>,
    Json(payload): Json<UpdateCompetencyRequest>,
) -> Result<(StatusCode, Json<CompetencyResponse>), (StatusCode, String)> {
    identity.require_master("update competencies")?;
    let updates = payload.validate()?;
    let competency = CompetencyRepository::new()
        .update(competency_id, updates)
        .await?;
    Ok((StatusCode::OK, Json(competency.into())))
}

/// Delete a competency that has never been scored (master only)
#[utoipa::path(
    delete,
    path = "/api/v1/competencies/{competency_id}",
    params(("competency_id" = Uuid, Path, description = "Competency ID")),
    responses(
        (status = 204, description = "Competency deleted"),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Competency not found"),
        (status = 409, description = "Competency is used by evaluations")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn delete_competency(
    CurrentUser(identity): CurrentUser,
    Path(competency_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    identity.require_master("delete competencies")?;
    CompetencyRepository::new().delete(competency_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
