use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::EvaluationStatus;
use crate::repositories::{DashboardStats, RecentEvaluation};

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentEvaluationResponse {
    pub evaluation_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub status: EvaluationStatus,
    #[schema(value_type = Option<String>, example = "4.30")]
    pub total_score: Option<Decimal>,
    pub updated_at: NaiveDateTime,
}

impl From<RecentEvaluation> for RecentEvaluationResponse {
    fn from(r: RecentEvaluation) -> Self {
        Self {
            evaluation_id: r.evaluation_id,
            employee_id: r.employee_id,
            employee_name: r.employee_name,
            status: r.status,
            total_score: r.total_score,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub total_employees: u64,
    pub completed_evaluations: u64,
    /// Submitted and waiting to be completed
    pub in_progress_evaluations: u64,
    /// Still in draft
    pub pending_evaluations: u64,
    pub recent_evaluations: Vec<RecentEvaluationResponse>,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_employees: s.total_employees,
            completed_evaluations: s.completed_evaluations,
            in_progress_evaluations: s.in_progress_evaluations,
            pending_evaluations: s.pending_evaluations,
            recent_evaluations: s.recent_evaluations.into_iter().map(Into::into).collect(),
        }
    }
}
