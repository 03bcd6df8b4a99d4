use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

use crate::domain::{HierarchyError, NineBoxError, ScoringError, WorkflowError};

#[derive(Debug, Error)]
pub enum AppError {
    /// Input that can never be accepted as sent (ranges, missing fields, credit sum).
    #[error("{0}")]
    Validation(String),

    /// Conflicts with existing rows: leadership cycles, taken unique values.
    #[error("{0}")]
    Referential(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("storage is unavailable, the change was not saved")]
    StorageUnavailable,

    #[error("database error: {0}")]
    Database(DbErr),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Referential(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Connection level failures mean the store is unreachable rather than the query being wrong.
pub fn is_unreachable(err: &DbErr) -> bool {
    matches!(err, DbErr::ConnectionAcquire(_) | DbErr::Conn(_))
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if is_unreachable(&err) {
            tracing::error!("Storage unreachable: {}", err);
            AppError::StorageUnavailable
        } else {
            AppError::Database(err)
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<NineBoxError> for AppError {
    fn from(err: NineBoxError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<HierarchyError> for AppError {
    fn from(err: HierarchyError) -> Self {
        match err {
            HierarchyError::UnknownLeader(id) => AppError::NotFound(format!("Leader {id}")),
            HierarchyError::Cycle { .. } => AppError::Referential(err.to_string()),
        }
    }
}

impl From<AppError> for (StatusCode, String) {
    fn from(err: AppError) -> Self {
        (err.status_code(), err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn domain_errors_map_to_their_category() {
        let shortfall: AppError = ScoringError::Shortfall {
            total_weight: 20,
            missing: 80,
        }
        .into();
        assert_eq!(shortfall.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let cycle: AppError = HierarchyError::Cycle {
            employee_id: Uuid::new_v4(),
            leader_id: Uuid::new_v4(),
        }
        .into();
        assert_eq!(cycle.status_code(), StatusCode::CONFLICT);

        let unknown: AppError = HierarchyError::UnknownLeader(Uuid::nil()).into();
        assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn connection_failures_become_storage_unavailable() {
        let err: AppError = DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".into())).into();
        assert!(matches!(err, AppError::StorageUnavailable));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let err: AppError = DbErr::RecordNotFound("x".into()).into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn converts_into_handler_error_pair() {
        let (status, message): (StatusCode, String) = AppError::not_found("Position").into();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Position not found");
    }
}
