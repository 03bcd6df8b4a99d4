use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, patch, put},
};
use uuid::Uuid;

use super::dto::{
    CreateEvaluationRequest, EvaluationListResponse, EvaluationQuery,
    EvaluationResponse, SaveScoresRequest, ScoreSheetResponse, StoredScoreResponse,
    StoredScoresResponse, UpdateEvaluationRequest, UpdateStatusRequest,
};
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::EvaluationRepository;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/evaluations",
            get(get_all_evaluations).post(create_evaluation),
        )
        .route(
            "/api/v1/evaluations/{evaluation_id}",
            get(get_evaluation)
                .put(update_evaluation)
                .delete(delete_evaluation),
        )
        .route(
            "/api/v1/evaluations/{evaluation_id}/scores",
            put(save_scores).get(get_scores),
        )
        .route(
            "/api/v1/evaluations/{evaluation_id}/status",
            patch(update_status),
        )
}

/// List evaluations, most recently updated first
#[utoipa::path(
    get,
    path = "/api/v1/evaluations",
    params(EvaluationQuery),
    responses(
        (status = 200, description = "Evaluations retrieved", body = EvaluationListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn get_all_evaluations(
    CurrentUser(_identity): CurrentUser,
    Query(query): Query<EvaluationQuery>,
) -> Result<(StatusCode, Json<EvaluationListResponse>), (StatusCode, String)> {
    let evaluations = EvaluationRepository::new().find_all(query.into()).await?;
    Ok((StatusCode::OK, Json(evaluations.into())))
}

/// Get evaluation by ID
#[utoipa::path(
    get,
    path = "/api/v1/evaluations/{evaluation_id}",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Evaluation retrieved", body = EvaluationResponse),
        (status = 404, description = "Evaluation not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn get_evaluation(
    CurrentUser(_identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
) -> Result<(StatusCode, Json<EvaluationResponse>), (StatusCode, String)> {
    let evaluation = EvaluationRepository::new()
        .find_by_id(evaluation_id)
        .await?
        .ok_or_else(|| AppError::not_found("Evaluation"))?;
    Ok((StatusCode::OK, Json(evaluation.into())))
}

/// Open a draft evaluation
#[utoipa::path(
    post,
    path = "/api/v1/evaluations",
    request_body = CreateEvaluationRequest,
    responses(
        (status = 201, description = "Evaluation created as draft", body = EvaluationResponse),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "Cycle or employee not found"),
        (status = 503, description = "Storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn create_evaluation(
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<CreateEvaluationRequest>,
) -> Result<(StatusCode, Json<EvaluationResponse>), (StatusCode, String)> {
    identity.require_evaluator("create evaluations")?;
    let evaluation = EvaluationRepository::new().create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(evaluation.into())))
}

/// Reassign cycle, employee or evaluator of an open evaluation
#[utoipa::path(
    put,
    path = "/api/v1/evaluations/{evaluation_id}",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    request_body = UpdateEvaluationRequest,
    responses(
        (status = 200, description = "Evaluation updated", body = EvaluationResponse),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "Evaluation, cycle or employee not found"),
        (status = 422, description = "Evaluation is completed")
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn update_evaluation(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
    Json(payload): Json<UpdateEvaluationRequest>,
) -> Result<(StatusCode, Json<EvaluationResponse>), (StatusCode, String)> {
    identity.require_evaluator("update evaluations")?;
    let evaluation = EvaluationRepository::new()
        .update(evaluation_id, payload.into())
        .await?;
    Ok((StatusCode::OK, Json(evaluation.into())))
}

/// Delete an evaluation with its scores, PDI and nine-box record (master only)
#[utoipa::path(
    delete,
    path = "/api/v1/evaluations/{evaluation_id}",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 204, description = "Evaluation deleted"),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Evaluation not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn delete_evaluation(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    identity.require_master("delete evaluations")?;
    EvaluationRepository::new().delete(evaluation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the score sheet; with `submit` the credits must total exactly 100
#[utoipa::path(
    put,
    path = "/api/v1/evaluations/{evaluation_id}/scores",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    request_body = SaveScoresRequest,
    responses(
        (status = 200, description = "Score sheet saved", body = ScoreSheetResponse),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "Evaluation or competency not found"),
        (status = 422, description = "Out of range values, duplicated competency, credits not totalling 100 on submit, or completed evaluation"),
        (status = 503, description = "Storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn save_scores(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
    Json(payload): Json<SaveScoresRequest>,
) -> Result<(StatusCode, Json<ScoreSheetResponse>), (StatusCode, String)> {
    identity.require_evaluator("score evaluations")?;
    let saved = EvaluationRepository::new()
        .save_scores(evaluation_id, &payload.entries, payload.submit)
        .await?;
    Ok((StatusCode::OK, Json(saved.into())))
}

/// Stored score rows of an evaluation
#[utoipa::path(
    get,
    path = "/api/v1/evaluations/{evaluation_id}/scores",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Scores retrieved", body = StoredScoresResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn get_scores(
    CurrentUser(_identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
) -> Result<(StatusCode, Json<StoredScoresResponse>), (StatusCode, String)> {
    let rows = EvaluationRepository::new().scores(evaluation_id).await?;
    let response = StoredScoresResponse {
        evaluation_id,
        total_weight: rows.iter().map(|r| r.weight).sum(),
        scores: rows.into_iter().map(StoredScoreResponse::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Move an evaluation through draft, submitted and completed
#[utoipa::path(
    patch,
    path = "/api/v1/evaluations/{evaluation_id}/status",
    params(("evaluation_id" = Uuid, Path, description = "Evaluation ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = EvaluationResponse),
        (status = 403, description = "Forbidden - evaluators only"),
        (status = 404, description = "Evaluation not found"),
        (status = 422, description = "Transition not allowed or stored sheet incomplete")
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
pub async fn update_status(
    CurrentUser(identity): CurrentUser,
    Path(evaluation_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<(StatusCode, Json<EvaluationResponse>), (StatusCode, String)> {
    identity.require_evaluator("change evaluation status")?;
    let evaluation = EvaluationRepository::new()
        .set_status(evaluation_id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(evaluation.into())))
}
