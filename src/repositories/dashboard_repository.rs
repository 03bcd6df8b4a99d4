use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use super::{Store, degrade};
use crate::config::RECENT_ACTIVITY_LIMIT;
use crate::entities::{employee, evaluation, sea_orm_active_enums::EvaluationStatus};
use crate::errors::AppResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_employees: u64,
    pub completed_evaluations: u64,
    pub in_progress_evaluations: u64,
    pub pending_evaluations: u64,
    pub recent_evaluations: Vec<RecentEvaluation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentEvaluation {
    pub evaluation_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub status: EvaluationStatus,
    pub total_score: Option<Decimal>,
    pub updated_at: chrono::NaiveDateTime,
}

pub struct DashboardRepository {
    store: Store,
}

impl DashboardRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let Some(db) = self.store.reader() else {
            return Ok(DashboardStats::default());
        };
        degrade(collect_stats(db).await)
    }
}

async fn count_with_status<C: ConnectionTrait>(
    db: &C,
    status: EvaluationStatus,
) -> Result<u64, DbErr> {
    evaluation::Entity::find()
        .filter(evaluation::Column::Status.eq(status))
        .count(db)
        .await
}

async fn collect_stats<C: ConnectionTrait>(db: &C) -> Result<DashboardStats, DbErr> {
    let total_employees = employee::Entity::find().count(db).await?;
    let completed_evaluations = count_with_status(db, EvaluationStatus::Completed).await?;
    let in_progress_evaluations = count_with_status(db, EvaluationStatus::Submitted).await?;
    let pending_evaluations = count_with_status(db, EvaluationStatus::Draft).await?;

    let recent = evaluation::Entity::find()
        .order_by_desc(evaluation::Column::UpdatedAt)
        .limit(RECENT_ACTIVITY_LIMIT)
        .all(db)
        .await?;

    let employee_ids: Vec<Uuid> = recent.iter().map(|e| e.evaluated_employee_id).collect();
    let employees = if employee_ids.is_empty() {
        Vec::new()
    } else {
        employee::Entity::find()
            .filter(employee::Column::EmployeeId.is_in(employee_ids))
            .all(db)
            .await?
    };

    let recent_evaluations = recent
        .into_iter()
        .map(|evaluation| RecentEvaluation {
            evaluation_id: evaluation.evaluation_id,
            employee_id: evaluation.evaluated_employee_id,
            employee_name: employees
                .iter()
                .find(|e| e.employee_id == evaluation.evaluated_employee_id)
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            status: evaluation.status,
            total_score: evaluation.total_score,
            updated_at: evaluation.updated_at,
        })
        .collect();

    Ok(DashboardStats {
        total_employees,
        completed_evaluations,
        in_progress_evaluations,
        pending_evaluations,
        recent_evaluations,
    })
}
