use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use super::{Store, degrade};
use crate::domain::{
    ScoreEntry, ScoreSheet,
    workflow::{check_transition, ensure_editable, requires_complete_sheet},
};
use crate::entities::{
    competency, employee, evaluation, evaluation_cycle, evaluation_score, nine_box, pdi,
    sea_orm_active_enums::EvaluationStatus,
};
use crate::errors::{AppError, AppResult};

pub struct EvaluationRepository {
    store: Store,
}

pub struct NewEvaluation {
    pub cycle_id: Uuid,
    pub evaluated_employee_id: Uuid,
    pub evaluator_id: Uuid,
}

#[derive(Default)]
pub struct EvaluationUpdate {
    pub cycle_id: Option<Uuid>,
    pub evaluated_employee_id: Option<Uuid>,
    pub evaluator_id: Option<Uuid>,
}

#[derive(Debug, Default, Clone)]
pub struct EvaluationFilter {
    pub cycle_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub evaluator_id: Option<Uuid>,
    pub status: Option<EvaluationStatus>,
}

/// Result of persisting a score sheet.
#[derive(Debug, Clone)]
pub struct SavedSheet {
    pub evaluation: evaluation::Model,
    pub sheet: ScoreSheet,
}

impl EvaluationRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// Most recently updated first.
    pub async fn find_all(&self, filter: EvaluationFilter) -> AppResult<Vec<evaluation::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        let mut query = evaluation::Entity::find();
        if let Some(cycle_id) = filter.cycle_id {
            query = query.filter(evaluation::Column::CycleId.eq(cycle_id));
        }
        if let Some(employee_id) = filter.employee_id {
            query = query.filter(evaluation::Column::EvaluatedEmployeeId.eq(employee_id));
        }
        if let Some(evaluator_id) = filter.evaluator_id {
            query = query.filter(evaluation::Column::EvaluatorId.eq(evaluator_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(evaluation::Column::Status.eq(status));
        }
        degrade(
            query
                .order_by_desc(evaluation::Column::UpdatedAt)
                .all(db)
                .await,
        )
    }

    pub async fn find_by_id(&self, evaluation_id: Uuid) -> AppResult<Option<evaluation::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(evaluation::Entity::find_by_id(evaluation_id).one(db).await)
    }

    pub async fn scores(&self, evaluation_id: Uuid) -> AppResult<Vec<evaluation_score::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        degrade(
            evaluation_score::Entity::find()
                .filter(evaluation_score::Column::EvaluationId.eq(evaluation_id))
                .order_by_asc(evaluation_score::Column::CreatedAt)
                .all(db)
                .await,
        )
    }

    pub async fn create(&self, new: NewEvaluation) -> AppResult<evaluation::Model> {
        let db = self.store.writer()?;
        ensure_cycle_exists(db, new.cycle_id).await?;
        ensure_employee_exists(db, new.evaluated_employee_id, "Evaluated employee").await?;
        ensure_employee_exists(db, new.evaluator_id, "Evaluator").await?;

        let now = Utc::now().naive_utc();
        let model = evaluation::ActiveModel {
            evaluation_id: Set(Uuid::new_v4()),
            cycle_id: Set(new.cycle_id),
            evaluated_employee_id: Set(new.evaluated_employee_id),
            evaluator_id: Set(new.evaluator_id),
            status: Set(EvaluationStatus::Draft),
            total_score: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(db).await?)
    }

    /// Reassigning the evaluated employee moves the nine-box and PDI records
    /// along with the evaluation.
    pub async fn update(
        &self,
        evaluation_id: Uuid,
        updates: EvaluationUpdate,
    ) -> AppResult<evaluation::Model> {
        let db = self.store.writer()?;
        let evaluation = find_for_write(db, evaluation_id).await?;
        ensure_editable(evaluation.status)?;

        if let Some(cycle_id) = updates.cycle_id {
            ensure_cycle_exists(db, cycle_id).await?;
        }
        if let Some(employee_id) = updates.evaluated_employee_id {
            ensure_employee_exists(db, employee_id, "Evaluated employee").await?;
        }
        if let Some(evaluator_id) = updates.evaluator_id {
            ensure_employee_exists(db, evaluator_id, "Evaluator").await?;
        }

        let now = Utc::now().naive_utc();
        let reassigned_to = updates
            .evaluated_employee_id
            .filter(|id| *id != evaluation.evaluated_employee_id);

        let mut active: evaluation::ActiveModel = evaluation.into();
        if let Some(cycle_id) = updates.cycle_id {
            active.cycle_id = Set(cycle_id);
        }
        if let Some(employee_id) = updates.evaluated_employee_id {
            active.evaluated_employee_id = Set(employee_id);
        }
        if let Some(evaluator_id) = updates.evaluator_id {
            active.evaluator_id = Set(evaluator_id);
        }
        active.updated_at = Set(now);

        let txn = db.begin().await?;
        if let Some(employee_id) = reassigned_to {
            nine_box::Entity::update_many()
                .col_expr(nine_box::Column::EmployeeId, Expr::value(employee_id))
                .col_expr(nine_box::Column::UpdatedAt, Expr::value(now))
                .filter(nine_box::Column::EvaluationId.eq(evaluation_id))
                .exec(&txn)
                .await?;
            pdi::Entity::update_many()
                .col_expr(pdi::Column::EmployeeId, Expr::value(employee_id))
                .col_expr(pdi::Column::UpdatedAt, Expr::value(now))
                .filter(pdi::Column::EvaluationId.eq(evaluation_id))
                .exec(&txn)
                .await?;
        }
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        if let Some(employee_id) = reassigned_to {
            tracing::info!(
                "Evaluation {} reassigned to employee {}",
                evaluation_id,
                employee_id
            );
        }
        Ok(updated)
    }

    /// Scores, PDI and nine-box records go with the evaluation.
    pub async fn delete(&self, evaluation_id: Uuid) -> AppResult<()> {
        let db = self.store.writer()?;
        let evaluation = find_for_write(db, evaluation_id).await?;
        evaluation::Entity::delete_by_id(evaluation.evaluation_id)
            .exec(db)
            .await?;
        Ok(())
    }

    /// Replaces the score sheet of an evaluation and stores the new total.
    ///
    /// With `submit` the sheet must distribute exactly 100 credits and the
    /// evaluation moves to `submitted`. Nothing is written when any check fails.
    pub async fn save_scores(
        &self,
        evaluation_id: Uuid,
        entries: &[ScoreEntry],
        submit: bool,
    ) -> AppResult<SavedSheet> {
        let sheet = ScoreSheet::compute(entries)?;
        let db = self.store.writer()?;
        let evaluation = find_for_write(db, evaluation_id).await?;
        ensure_editable(evaluation.status)?;

        let target = if submit {
            EvaluationStatus::Submitted
        } else {
            evaluation.status
        };
        if target != evaluation.status {
            check_transition(evaluation.status, target)?;
        }
        if requires_complete_sheet(target) {
            sheet.ensure_complete()?;
        }

        let ids: Vec<Uuid> = entries.iter().map(|e| e.competency_id).collect();
        ensure_competencies_exist(db, &ids).await?;

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;
        evaluation_score::Entity::delete_many()
            .filter(evaluation_score::Column::EvaluationId.eq(evaluation_id))
            .exec(&txn)
            .await?;

        if !sheet.entries.is_empty() {
            let rows = sheet
                .entries
                .iter()
                .map(|entry| evaluation_score::ActiveModel {
                    evaluation_score_id: Set(Uuid::new_v4()),
                    evaluation_id: Set(evaluation_id),
                    competency_id: Set(entry.competency_id),
                    weight: Set(entry.weight),
                    score: Set(entry.rating),
                    weighted_score: Set(entry.weighted_score),
                    created_at: Set(now),
                    updated_at: Set(now),
                });
            evaluation_score::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        let mut active: evaluation::ActiveModel = evaluation.into();
        active.total_score = Set((!sheet.entries.is_empty()).then_some(sheet.total_score));
        active.status = Set(target);
        active.updated_at = Set(now);
        let evaluation = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            "Score sheet saved for evaluation {} (total {}, {} credits, status {})",
            evaluation_id,
            sheet.total_score,
            sheet.total_weight,
            evaluation.status.as_str()
        );

        Ok(SavedSheet { evaluation, sheet })
    }

    /// Moves an evaluation through its lifecycle.
    ///
    /// Entering `submitted` or `completed` re-checks the stored sheet.
    pub async fn set_status(
        &self,
        evaluation_id: Uuid,
        to: EvaluationStatus,
    ) -> AppResult<evaluation::Model> {
        let db = self.store.writer()?;
        let evaluation = find_for_write(db, evaluation_id).await?;
        check_transition(evaluation.status, to)?;

        let mut total_score = evaluation.total_score;
        if requires_complete_sheet(to) {
            let stored: Vec<ScoreEntry> = evaluation_score::Entity::find()
                .filter(evaluation_score::Column::EvaluationId.eq(evaluation_id))
                .all(db)
                .await?
                .into_iter()
                .map(|row| ScoreEntry {
                    competency_id: row.competency_id,
                    weight: row.weight,
                    rating: row.score,
                })
                .collect();
            let sheet = ScoreSheet::compute(&stored)?;
            sheet.ensure_complete()?;
            total_score = Some(sheet.total_score);
        }

        let from = evaluation.status;
        let mut active: evaluation::ActiveModel = evaluation.into();
        active.status = Set(to);
        active.total_score = Set(total_score);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(db).await?;

        tracing::info!(
            "Evaluation {} moved from {} to {}",
            evaluation_id,
            from.as_str(),
            to.as_str()
        );
        Ok(updated)
    }
}

async fn find_for_write<C: ConnectionTrait>(
    db: &C,
    evaluation_id: Uuid,
) -> AppResult<evaluation::Model> {
    evaluation::Entity::find_by_id(evaluation_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Evaluation"))
}

async fn ensure_cycle_exists<C: ConnectionTrait>(db: &C, cycle_id: Uuid) -> AppResult<()> {
    evaluation_cycle::Entity::find_by_id(cycle_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("Evaluation cycle {cycle_id}")))
}

async fn ensure_employee_exists<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    role: &str,
) -> AppResult<()> {
    employee::Entity::find_by_id(employee_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("{role} {employee_id}")))
}

async fn ensure_competencies_exist<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: HashSet<Uuid> = competency::Entity::find()
        .filter(competency::Column::CompetencyId.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|c| c.competency_id)
        .collect();

    match ids.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(AppError::not_found(format!("Competency {missing}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::CompetencyCategory;
    use crate::repositories::test_support::timestamp;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::str::FromStr;

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

    fn competency_model(id: Uuid) -> competency::Model {
        competency::Model {
            competency_id: id,
            name: format!("Competency {id}"),
            description: None,
            category: CompetencyCategory::CulturalCore,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn score_row(evaluation_id: Uuid, weight: i32, rating: i32) -> evaluation_score::Model {
        evaluation_score::Model {
            evaluation_score_id: Uuid::new_v4(),
            evaluation_id,
            competency_id: Uuid::new_v4(),
            weight,
            score: rating,
            weighted_score: crate::domain::scoring::weighted_score(weight, rating),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn four_entries() -> Vec<ScoreEntry> {
        [(25, 5), (25, 4), (25, 3), (25, 2)]
            .into_iter()
            .map(|(weight, rating)| ScoreEntry {
                competency_id: Uuid::new_v4(),
                weight,
                rating,
            })
            .collect()
    }

    fn exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    #[tokio::test]
    async fn submitting_a_complete_sheet_stores_total_and_status() {
        let draft = evaluation_model(EvaluationStatus::Draft);
        let entries = four_entries();
        let competencies: Vec<_> = entries
            .iter()
            .map(|e| competency_model(e.competency_id))
            .collect();
        let stored = evaluation::Model {
            status: EvaluationStatus::Submitted,
            total_score: Some(Decimal::from_str("3.50").unwrap()),
            ..draft.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([competencies])
            .append_exec_results([exec(0), exec(4)])
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db));

        let saved = repo
            .save_scores(draft.evaluation_id, &entries, true)
            .await
            .unwrap();
        assert_eq!(saved.sheet.total_score.to_string(), "3.50");
        assert!(saved.sheet.is_complete());
        assert_eq!(saved.evaluation.status, EvaluationStatus::Submitted);
    }

    #[tokio::test]
    async fn submitting_an_incomplete_sheet_writes_nothing() {
        let draft = evaluation_model(EvaluationStatus::Draft);
        // only the lookup is mocked, any write would fail the test
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db));

        let entries = [ScoreEntry {
            competency_id: Uuid::new_v4(),
            weight: 20,
            rating: 4,
        }];
        let err = repo
            .save_scores(draft.evaluation_id, &entries, true)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(message) => assert!(message.contains("80 credits")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn completed_evaluations_are_locked() {
        let done = evaluation_model(EvaluationStatus::Completed);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![done.clone()]])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db));

        let err = repo
            .save_scores(done.evaluation_id, &four_entries(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn range_errors_surface_before_storage_is_needed() {
        let repo = EvaluationRepository::with_store(Store::disconnected());
        let entries = [ScoreEntry {
            competency_id: Uuid::new_v4(),
            weight: 50,
            rating: 9,
        }];
        assert!(matches!(
            repo.save_scores(Uuid::new_v4(), &entries, false).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.save_scores(Uuid::new_v4(), &four_entries(), false).await,
            Err(AppError::StorageUnavailable)
        ));
    }

    #[tokio::test]
    async fn completing_rechecks_stored_weights() {
        let submitted = evaluation_model(EvaluationStatus::Draft);
        let id = submitted.evaluation_id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![submitted.clone()]])
            .append_query_results([vec![score_row(id, 60, 4), score_row(id, 30, 3)]])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db));

        let err = repo
            .set_status(id, EvaluationStatus::Completed)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(message) => assert!(message.contains("10 credits")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn completing_a_full_sheet_succeeds() {
        let submitted = evaluation_model(EvaluationStatus::Submitted);
        let id = submitted.evaluation_id;
        let completed = evaluation::Model {
            status: EvaluationStatus::Completed,
            total_score: Some(Decimal::from_str("3.70").unwrap()),
            ..submitted.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![submitted.clone()]])
            .append_query_results([vec![score_row(id, 70, 4), score_row(id, 30, 3)]])
            .append_query_results([vec![completed.clone()]])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db));

        let updated = repo.set_status(id, EvaluationStatus::Completed).await.unwrap();
        assert_eq!(updated, completed);
    }

    #[tokio::test]
    async fn reopening_a_completed_evaluation_is_rejected() {
        let done = evaluation_model(EvaluationStatus::Completed);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![done.clone()]])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db));

        assert!(matches!(
            repo.set_status(done.evaluation_id, EvaluationStatus::Draft).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn reassigning_moves_nine_box_and_pdi_records() {
        let draft = evaluation_model(EvaluationStatus::Draft);
        let new_employee = Uuid::new_v4();
        let target = employee::Model {
            employee_id: new_employee,
            user_id: None,
            name: "Joana".to_string(),
            badge: "B-77".to_string(),
            sector: "Sales".to_string(),
            email: "joana@example.com".to_string(),
            cpf: "333.333.333-33".to_string(),
            position_id: Uuid::new_v4(),
            birth_date: None,
            admission_date: crate::repositories::test_support::date(2021, 6, 1),
            leader_id: None,
            access_level: crate::entities::sea_orm_active_enums::AccessLevel::Pleno,
            last_access_at: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        };
        let reassigned = evaluation::Model {
            evaluated_employee_id: new_employee,
            ..draft.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([vec![target]])
            .append_exec_results([exec(1), exec(1)])
            .append_query_results([vec![reassigned.clone()]])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db.clone()));

        let updated = repo
            .update(
                draft.evaluation_id,
                EvaluationUpdate {
                    evaluated_employee_id: Some(new_employee),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.evaluated_employee_id, new_employee);

        let statements: Vec<String> = db
            .into_transaction_log()
            .into_iter()
            .flat_map(|txn| txn.statements().to_vec())
            .map(|stmt| stmt.sql)
            .collect();
        assert!(statements.iter().any(|sql| sql.starts_with(r#"UPDATE "nine_box""#)));
        assert!(statements.iter().any(|sql| sql.starts_with(r#"UPDATE "pdi""#)));
    }

    #[tokio::test]
    async fn unknown_cycle_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<evaluation_cycle::Model>::new()])
            .into_connection();
        let repo = EvaluationRepository::with_store(Store::from_connection(db));

        let err = repo
            .create(NewEvaluation {
                cycle_id: Uuid::new_v4(),
                evaluated_employee_id: Uuid::new_v4(),
                evaluator_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
