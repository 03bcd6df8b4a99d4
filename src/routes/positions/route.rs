use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use uuid::Uuid;

use super::dto::{
    CreatePositionRequest, PositionListResponse, PositionResponse, UpdatePositionRequest,
};
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::PositionRepository;
use crate::routes::competencies::dto::CompetencyListResponse;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/positions",
            get(get_all_positions).post(create_position),
        )
        .route(
            "/api/v1/positions/{position_id}",
            get(get_position).put(update_position).delete(delete_position),
        )
        .route(
            "/api/v1/positions/{position_id}/competencies",
            get(get_position_competencies),
        )
}

/// List positions
#[utoipa::path(
    get,
    path = "/api/v1/positions",
    responses(
        (status = 200, description = "Positions retrieved", body = PositionListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Positions"
)]
pub async fn get_all_positions(
    CurrentUser(_identity): CurrentUser,
) -> Result<(StatusCode, Json<PositionListResponse>), (StatusCode, String)> {
    let positions = PositionRepository::new().find_all().await?;
    let response = PositionListResponse {
        total: positions.len(),
        positions: positions.into_iter().map(Into::into).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get position by ID
#[utoipa::path(
    get,
    path = "/api/v1/positions/{position_id}",
    params(("position_id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position retrieved", body = PositionResponse),
        (status = 404, description = "Position not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Positions"
)]
pub async fn get_position(
    CurrentUser(_identity): CurrentUser,
    Path(position_id): Path<Uuid>,
) -> Result<(StatusCode, Json<PositionResponse>), (StatusCode, String)> {
    let position = PositionRepository::new()
        .find_by_id(position_id)
        .await?
        .ok_or_else(|| AppError::not_found("Position"))?;
    Ok((StatusCode::OK, Json(position.into())))
}

/// Competencies required by a position
#[utoipa::path(
    get,
    path = "/api/v1/positions/{position_id}/competencies",
    params(("position_id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Competencies retrieved", body = CompetencyListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Positions"
)]
pub async fn get_position_competencies(
    CurrentUser(_identity): CurrentUser,
    Path(position_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CompetencyListResponse>), (StatusCode, String)> {
    let competencies = PositionRepository::new().competencies(position_id).await?;
    Ok((StatusCode::OK, Json(competencies.into())))
}

/// Create a position with its competencies (master only)
#[utoipa::path(
    post,
    path = "/api/v1/positions",
    request_body = CreatePositionRequest,
    responses(
        (status = 201, description = "Position created", body = PositionResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Unknown competency"),
        (status = 422, description = "Invalid payload"),
        (status = 503, description = "Storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Positions"
)]
pub async fn create_position(
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<CreatePositionRequest>,
) -> Result<(StatusCode, Json<PositionResponse>), (StatusCode, String)> {
    identity.require_master("create positions")?;
    let new = payload.validate()?;
    let position = PositionRepository::new().create(new).await?;
    Ok((StatusCode::CREATED, Json(position.into())))
}

/// Update a position (master only)
#[utoipa::path(
    put,
    path = "/api/v1/positions/{position_id}",
    params(("position_id" = Uuid, Path, description = "Position ID")),
    request_body = UpdatePositionRequest,
    responses(
        (status = 200, description = "Position updated", body = PositionResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Position or competency not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Positions"
)]
pub async fn update_position(
    CurrentUser(identity): CurrentUser,
    Path(position_id): Path<Uuid>,
    Json(payload): Json<UpdatePositionRequest>,
) -> Result<(StatusCode, Json<PositionResponse>), (StatusCode, String)> {
    identity.require_master("update positions")?;
    let updates = payload.validate()?;
    let position = PositionRepository::new().update(position_id, updates).await?;
    Ok((StatusCode::OK, Json(position.into())))
}

/// Delete a position nobody holds (master only)
#[utoipa::path(
    delete,
    path = "/api/v1/positions/{position_id}",
    params(("position_id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 204, description = "Position deleted"),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Position not found"),
        (status = 409, description = "Position still held by employees")
    ),
    security(("bearer_auth" = [])),
    tag = "Positions"
)]
pub async fn delete_position(
    CurrentUser(identity): CurrentUser,
    Path(position_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    identity.require_master("delete positions")?;
    PositionRepository::new().delete(position_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
