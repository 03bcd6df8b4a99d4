use axum::{
    Router,
    extract::{Path, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use super::dto::{ReportQuery, attachment_name};
use crate::errors::AppResult;
use crate::extractor::CurrentUser;
use crate::reports::{
    ReportKind, ReportTable, competencies_table, employees_table, evaluations_table,
    nine_box_table, pdis_table,
};
use crate::repositories::{
    CompetencyRepository, CycleRepository, EmployeeRepository, EvaluationFilter,
    EvaluationRepository, NineBoxRepository, PdiRepository, PositionRepository,
};

pub fn create_route() -> Router {
    Router::new().route("/api/v1/reports/{kind}", get(download_report))
}

async fn build_table(kind: ReportKind) -> AppResult<ReportTable> {
    let table = match kind {
        ReportKind::Employees => {
            let employees = EmployeeRepository::new().find_all().await?;
            let positions = PositionRepository::new().find_all().await?;
            employees_table(&employees, &positions)
        }
        ReportKind::Evaluations => {
            let evaluations = EvaluationRepository::new()
                .find_all(EvaluationFilter::default())
                .await?;
            let employees = EmployeeRepository::new().find_all().await?;
            let cycles = CycleRepository::new().find_all().await?;
            evaluations_table(&evaluations, &employees, &cycles)
        }
        ReportKind::NineBox => {
            let records = NineBoxRepository::new().find_all(None).await?;
            let employees = EmployeeRepository::new().find_all().await?;
            nine_box_table(&records, &employees)
        }
        ReportKind::Competencies => {
            let competencies = CompetencyRepository::new().find_all(None).await?;
            competencies_table(&competencies)
        }
        ReportKind::Pdis => {
            let pdis = PdiRepository::new().find_all(None).await?;
            let employees = EmployeeRepository::new().find_all().await?;
            pdis_table(&pdis, &employees)
        }
    };
    Ok(table)
}

/// Download a report as CSV or aligned plain text
#[utoipa::path(
    get,
    path = "/api/v1/reports/{kind}",
    params(
        ("kind" = String, Path, description = "employees, evaluations, nine-box, competencies or pdis"),
        ReportQuery
    ),
    responses(
        (status = 200, description = "Report file", content_type = "text/csv", body = String),
        (status = 404, description = "Unknown report")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn download_report(
    CurrentUser(identity): CurrentUser,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let kind = ReportKind::parse(&kind)?;
    let format = query.format.unwrap_or_default();

    let table = build_table(kind).await?;
    let body = table.render(format)?;

    tracing::info!(
        "Report {} exported as {} by {} ({} rows)",
        kind.slug(),
        format.extension(),
        identity.email,
        table.rows.len()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment_name(kind, format)),
            ),
        ],
        body,
    ))
}
