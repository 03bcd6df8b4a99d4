use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use uuid::Uuid;

use super::dto::{
    CreateEmployeeRequest, DeleteEmployeeResponse, EmployeeListResponse, EmployeeResponse,
    UpdateEmployeeRequest,
};
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::EmployeeRepository;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/employees",
            get(get_all_employees).post(create_employee),
        )
        .route(
            "/api/v1/employees/{employee_id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(
            "/api/v1/employees/{employee_id}/subordinates",
            get(get_subordinates),
        )
        .route(
            "/api/v1/employees/{employee_id}/leadership-chain",
            get(get_leadership_chain),
        )
}

/// List employees by name
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employees retrieved", body = EmployeeListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn get_all_employees(
    CurrentUser(_identity): CurrentUser,
) -> Result<(StatusCode, Json<EmployeeListResponse>), (StatusCode, String)> {
    let employees = EmployeeRepository::new().find_all().await?;
    Ok((StatusCode::OK, Json(employees.into())))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee retrieved", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn get_employee(
    CurrentUser(_identity): CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> Result<(StatusCode, Json<EmployeeResponse>), (StatusCode, String)> {
    let employee = EmployeeRepository::new()
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))?;
    Ok((StatusCode::OK, Json(employee.into())))
}

/// Direct reports of an employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/subordinates",
    params(("employee_id" = Uuid, Path, description = "Leader ID")),
    responses(
        (status = 200, description = "Direct reports retrieved", body = EmployeeListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn get_subordinates(
    CurrentUser(_identity): CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> Result<(StatusCode, Json<EmployeeListResponse>), (StatusCode, String)> {
    let subordinates = EmployeeRepository::new().subordinates(employee_id).await?;
    Ok((StatusCode::OK, Json(subordinates.into())))
}

/// Leaders above an employee, nearest first
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/leadership-chain",
    params(("employee_id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Leadership chain retrieved", body = EmployeeListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn get_leadership_chain(
    CurrentUser(_identity): CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> Result<(StatusCode, Json<EmployeeListResponse>), (StatusCode, String)> {
    let chain = EmployeeRepository::new()
        .leadership_chain(employee_id)
        .await?;
    Ok((StatusCode::OK, Json(chain.into())))
}

/// Register an employee (master only)
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Position or leader not found"),
        (status = 409, description = "Badge or CPF already in use"),
        (status = 422, description = "Invalid payload"),
        (status = 503, description = "Storage unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn create_employee(
    CurrentUser(identity): CurrentUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), (StatusCode, String)> {
    identity.require_master("register employees")?;
    let new = payload.validate()?;
    let employee = EmployeeRepository::new().create(new).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// Update an employee; leader changes are checked for cycles (master only)
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = Uuid, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Employee, position or leader not found"),
        (status = 409, description = "Leadership cycle or duplicate badge/CPF"),
        (status = 422, description = "Invalid payload")
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn update_employee(
    CurrentUser(identity): CurrentUser,
    Path(employee_id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), (StatusCode, String)> {
    identity.require_master("update employees")?;
    let updates = payload.validate()?;
    let employee = EmployeeRepository::new()
        .update(employee_id, updates)
        .await?;
    Ok((StatusCode::OK, Json(employee.into())))
}

/// Delete an employee, detaching their direct reports (master only)
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = DeleteEmployeeResponse),
        (status = 403, description = "Forbidden - master only"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee is still the evaluator of evaluations")
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn delete_employee(
    CurrentUser(identity): CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DeleteEmployeeResponse>), (StatusCode, String)> {
    identity.require_master("delete employees")?;
    let detached_subordinates = EmployeeRepository::new().delete(employee_id).await?;
    Ok((
        StatusCode::OK,
        Json(DeleteEmployeeResponse {
            employee_id,
            detached_subordinates,
        }),
    ))
}
