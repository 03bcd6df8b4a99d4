use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::{Store, degrade};
use crate::domain::classify_values;
use crate::entities::{evaluation, nine_box};
use crate::domain::workflow::ensure_editable;
use crate::errors::{AppError, AppResult};

pub struct NineBoxRepository {
    store: Store,
}

pub struct NineBoxInput {
    pub performance: i32,
    pub potential: i32,
}

impl NineBoxRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_all(&self, employee_id: Option<Uuid>) -> AppResult<Vec<nine_box::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        let mut query = nine_box::Entity::find();
        if let Some(employee_id) = employee_id {
            query = query.filter(nine_box::Column::EmployeeId.eq(employee_id));
        }
        degrade(
            query
                .order_by_desc(nine_box::Column::UpdatedAt)
                .all(db)
                .await,
        )
    }

    pub async fn find_by_evaluation(
        &self,
        evaluation_id: Uuid,
    ) -> AppResult<Option<nine_box::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(
            nine_box::Entity::find()
                .filter(nine_box::Column::EvaluationId.eq(evaluation_id))
                .one(db)
                .await,
        )
    }

    /// Classifies and stores the single nine-box record of an evaluation.
    pub async fn upsert(
        &self,
        evaluation_id: Uuid,
        input: NineBoxInput,
    ) -> AppResult<nine_box::Model> {
        let category = classify_values(input.performance, input.potential)?;
        let db = self.store.writer()?;

        let evaluation = evaluation::Entity::find_by_id(evaluation_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Evaluation"))?;
        ensure_editable(evaluation.status)?;

        let existing = nine_box::Entity::find()
            .filter(nine_box::Column::EvaluationId.eq(evaluation_id))
            .one(db)
            .await?;

        let now = Utc::now().naive_utc();
        let saved = match existing {
            Some(record) => {
                let mut active: nine_box::ActiveModel = record.into();
                active.employee_id = Set(evaluation.evaluated_employee_id);
                active.performance = Set(input.performance);
                active.potential = Set(input.potential);
                active.classification = Set(category.label().to_string());
                active.updated_at = Set(now);
                active.update(db).await?
            }
            None => {
                nine_box::ActiveModel {
                    nine_box_id: Set(Uuid::new_v4()),
                    evaluation_id: Set(evaluation_id),
                    employee_id: Set(evaluation.evaluated_employee_id),
                    performance: Set(input.performance),
                    potential: Set(input.potential),
                    classification: Set(category.label().to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(db)
                .await?
            }
        };

        tracing::info!(
            "Evaluation {} classified as {}",
            evaluation_id,
            saved.classification
        );
        Ok(saved)
    }

    pub async fn delete(&self, evaluation_id: Uuid) -> AppResult<()> {
        let db = self.store.writer()?;
        let evaluation = evaluation::Entity::find_by_id(evaluation_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Evaluation"))?;
        ensure_editable(evaluation.status)?;

        let result = nine_box::Entity::delete_many()
            .filter(nine_box::Column::EvaluationId.eq(evaluation_id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Nine-box record"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::EvaluationStatus;
    use crate::repositories::test_support::timestamp;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn evaluation_model(status: EvaluationStatus) -> evaluation::Model {
        evaluation::Model {
            evaluation_id: Uuid::new_v4(),
            cycle_id: Uuid::new_v4(),
            evaluated_employee_id: Uuid::new_v4(),
            evaluator_id: Uuid::new_v4(),
            status,
            total_score: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[tokio::test]
    async fn out_of_grid_levels_are_rejected_without_storage() {
        let repo = NineBoxRepository::with_store(Store::disconnected());
        let err = repo
            .upsert(
                Uuid::new_v4(),
                NineBoxInput {
                    performance: 4,
                    potential: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn first_classification_is_inserted_for_the_evaluated_employee() {
        let evaluation = evaluation_model(EvaluationStatus::Submitted);
        let inserted = nine_box::Model {
            nine_box_id: Uuid::new_v4(),
            evaluation_id: evaluation.evaluation_id,
            employee_id: evaluation.evaluated_employee_id,
            performance: 3,
            potential: 3,
            classification: "Top Talent - High Potential".to_string(),
            created_at: timestamp(),
            updated_at: timestamp(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![evaluation.clone()]])
            .append_query_results([Vec::<nine_box::Model>::new()])
            .append_query_results([vec![inserted.clone()]])
            .into_connection();
        let repo = NineBoxRepository::with_store(Store::from_connection(db));

        let saved = repo
            .upsert(
                evaluation.evaluation_id,
                NineBoxInput {
                    performance: 3,
                    potential: 3,
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.employee_id, evaluation.evaluated_employee_id);
        assert_eq!(saved.classification, "Top Talent - High Potential");
    }

    #[tokio::test]
    async fn completed_evaluations_keep_their_classification() {
        let done = evaluation_model(EvaluationStatus::Completed);
        // only the lookups are mocked, any write would fail the test
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![done.clone()], vec![done.clone()]])
            .into_connection();
        let repo = NineBoxRepository::with_store(Store::from_connection(db));

        let input = NineBoxInput {
            performance: 1,
            potential: 1,
        };
        assert!(matches!(
            repo.upsert(done.evaluation_id, input).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.delete(done.evaluation_id).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn deleting_a_missing_record_is_not_found() {
        let draft = evaluation_model(EvaluationStatus::Draft);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = NineBoxRepository::with_store(Store::from_connection(db));

        assert!(matches!(
            repo.delete(draft.evaluation_id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
