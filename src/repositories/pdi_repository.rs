use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::{Store, degrade};
use crate::entities::{evaluation, pdi};
use crate::domain::workflow::ensure_editable;
use crate::errors::{AppError, AppResult};

pub struct PdiRepository {
    store: Store,
}

#[derive(Default)]
pub struct PdiInput {
    pub strengths: Option<String>,
    pub improvement_areas: Option<String>,
    pub development_plan: Option<String>,
    pub feedback: Option<String>,
}

impl PdiRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_all(&self, employee_id: Option<Uuid>) -> AppResult<Vec<pdi::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        let mut query = pdi::Entity::find();
        if let Some(employee_id) = employee_id {
            query = query.filter(pdi::Column::EmployeeId.eq(employee_id));
        }
        degrade(query.order_by_desc(pdi::Column::UpdatedAt).all(db).await)
    }

    pub async fn find_by_evaluation(&self, evaluation_id: Uuid) -> AppResult<Option<pdi::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(
            pdi::Entity::find()
                .filter(pdi::Column::EvaluationId.eq(evaluation_id))
                .one(db)
                .await,
        )
    }

    /// Creates or replaces the development plan of an evaluation.
    pub async fn upsert(&self, evaluation_id: Uuid, input: PdiInput) -> AppResult<pdi::Model> {
        let db = self.store.writer()?;
        let evaluation = evaluation::Entity::find_by_id(evaluation_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Evaluation"))?;
        ensure_editable(evaluation.status)?;

        let existing = pdi::Entity::find()
            .filter(pdi::Column::EvaluationId.eq(evaluation_id))
            .one(db)
            .await?;

        let now = Utc::now().naive_utc();
        let saved = match existing {
            Some(record) => {
                let mut active: pdi::ActiveModel = record.into();
                active.employee_id = Set(evaluation.evaluated_employee_id);
                active.strengths = Set(input.strengths);
                active.improvement_areas = Set(input.improvement_areas);
                active.development_plan = Set(input.development_plan);
                active.feedback = Set(input.feedback);
                active.updated_at = Set(now);
                active.update(db).await?
            }
            None => {
                pdi::ActiveModel {
                    pdi_id: Set(Uuid::new_v4()),
                    evaluation_id: Set(evaluation_id),
                    employee_id: Set(evaluation.evaluated_employee_id),
                    strengths: Set(input.strengths),
                    improvement_areas: Set(input.improvement_areas),
                    development_plan: Set(input.development_plan),
                    feedback: Set(input.feedback),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(db)
                .await?
            }
        };
        Ok(saved)
    }

    pub async fn delete(&self, evaluation_id: Uuid) -> AppResult<()> {
        let db = self.store.writer()?;
        let evaluation = evaluation::Entity::find_by_id(evaluation_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Evaluation"))?;
        ensure_editable(evaluation.status)?;

        let result = pdi::Entity::delete_many()
            .filter(pdi::Column::EvaluationId.eq(evaluation_id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("PDI"));
        }
        Ok(())
    }
}
