use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{Level, NineBoxCategory, ScoreEntry, WeightedEntry};
use crate::entities::sea_orm_active_enums::{
    AccessLevel, CompetencyCategory, CycleStatus, EvaluationStatus, UserRole,
};
use crate::reports::ReportFormat;
use crate::routes::{
    auth, competencies, cycles, dashboard, employees, evaluations, health, nine_box, pdis,
    positions, reports, scoring,
};
use crate::session::Identity;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::route::health,
        auth::route::login,
        auth::route::logout,
        auth::route::me,
        competencies::route::get_all_competencies,
        competencies::route::get_competency,
        competencies::route::create_competency,
        competencies::route::update_competency,
        competencies::route::delete_competency,
        positions::route::get_all_positions,
        positions::route::get_position,
        positions::route::get_position_competencies,
        positions::route::create_position,
        positions::route::update_position,
        positions::route::delete_position,
        cycles::route::get_all_cycles,
        cycles::route::get_cycle,
        cycles::route::create_cycle,
        cycles::route::update_cycle,
        cycles::route::delete_cycle,
        employees::route::get_all_employees,
        employees::route::get_employee,
        employees::route::get_subordinates,
        employees::route::get_leadership_chain,
        employees::route::create_employee,
        employees::route::update_employee,
        employees::route::delete_employee,
        evaluations::route::get_all_evaluations,
        evaluations::route::get_evaluation,
        evaluations::route::create_evaluation,
        evaluations::route::update_evaluation,
        evaluations::route::delete_evaluation,
        evaluations::route::save_scores,
        evaluations::route::get_scores,
        evaluations::route::update_status,
        scoring::route::preview_scores,
        nine_box::route::get_all_nine_box,
        nine_box::route::get_nine_box_grid,
        nine_box::route::get_nine_box,
        nine_box::route::upsert_nine_box,
        nine_box::route::delete_nine_box,
        pdis::route::get_all_pdis,
        pdis::route::get_pdi,
        pdis::route::upsert_pdi,
        pdis::route::delete_pdi,
        dashboard::route::get_dashboard_stats,
        reports::route::download_report,
    ),
    components(
        schemas(
            health::route::HealthResponse,
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::LogoutResponse,
            Identity,
            UserRole,
            AccessLevel,
            CompetencyCategory,
            CycleStatus,
            EvaluationStatus,
            Level,
            NineBoxCategory,
            ScoreEntry,
            WeightedEntry,
            ReportFormat,
            competencies::dto::CreateCompetencyRequest,
            competencies::dto::UpdateCompetencyRequest,
            competencies::dto::CompetencyResponse,
            competencies::dto::CompetencyListResponse,
            positions::dto::CreatePositionRequest,
            positions::dto::UpdatePositionRequest,
            positions::dto::PositionResponse,
            positions::dto::PositionListResponse,
            cycles::dto::CreateCycleRequest,
            cycles::dto::UpdateCycleRequest,
            cycles::dto::CycleResponse,
            cycles::dto::CycleListResponse,
            employees::dto::CreateEmployeeRequest,
            employees::dto::UpdateEmployeeRequest,
            employees::dto::EmployeeResponse,
            employees::dto::EmployeeListResponse,
            employees::dto::DeleteEmployeeResponse,
            evaluations::dto::CreateEvaluationRequest,
            evaluations::dto::UpdateEvaluationRequest,
            evaluations::dto::SaveScoresRequest,
            evaluations::dto::UpdateStatusRequest,
            evaluations::dto::EvaluationResponse,
            evaluations::dto::EvaluationListResponse,
            evaluations::dto::ScoreSheetResponse,
            evaluations::dto::StoredScoreResponse,
            evaluations::dto::StoredScoresResponse,
            scoring::dto::ScorePreviewRequest,
            scoring::dto::ScorePreviewResponse,
            nine_box::dto::NineBoxRequest,
            nine_box::dto::NineBoxResponse,
            nine_box::dto::NineBoxListResponse,
            nine_box::dto::NineBoxCell,
            nine_box::dto::NineBoxGridResponse,
            pdis::dto::PdiRequest,
            pdis::dto::PdiResponse,
            pdis::dto::PdiListResponse,
            dashboard::dto::RecentEvaluationResponse,
            dashboard::dto::DashboardStatsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Login, logout and current session"),
        (name = "Competencies", description = "Competency catalog"),
        (name = "Positions", description = "Job positions and their competencies"),
        (name = "Cycles", description = "Evaluation cycles"),
        (name = "Employees", description = "Employees and leadership hierarchy"),
        (name = "Evaluations", description = "Evaluations, score sheets and status workflow"),
        (name = "Scoring", description = "Score sheet preview"),
        (name = "Nine Box", description = "Performance and potential grid"),
        (name = "PDI", description = "Individual development plans"),
        (name = "Dashboard", description = "Summary statistics"),
        (name = "Reports", description = "CSV and text exports"),
    ),
    info(
        title = "Dinamizar Performance API",
        version = "0.1.0",
        description = "Competency based performance evaluation: weighted score sheets, nine-box classification and development plans"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}
