use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{ScoreEntry, WeightedEntry};
use crate::entities::{evaluation, evaluation_score, sea_orm_active_enums::EvaluationStatus};
use crate::repositories::{EvaluationFilter, EvaluationUpdate, NewEvaluation, SavedSheet};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateEvaluationRequest {
    pub cycle_id: Uuid,
    pub evaluated_employee_id: Uuid,
    pub evaluator_id: Uuid,
}

impl From<CreateEvaluationRequest> for NewEvaluation {
    fn from(r: CreateEvaluationRequest) -> Self {
        Self {
            cycle_id: r.cycle_id,
            evaluated_employee_id: r.evaluated_employee_id,
            evaluator_id: r.evaluator_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateEvaluationRequest {
    pub cycle_id: Option<Uuid>,
    pub evaluated_employee_id: Option<Uuid>,
    pub evaluator_id: Option<Uuid>,
}

impl From<UpdateEvaluationRequest> for EvaluationUpdate {
    fn from(r: UpdateEvaluationRequest) -> Self {
        Self {
            cycle_id: r.cycle_id,
            evaluated_employee_id: r.evaluated_employee_id,
            evaluator_id: r.evaluator_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EvaluationQuery {
    pub cycle_id: Option<Uuid>,
    /// Evaluated employee
    pub employee_id: Option<Uuid>,
    pub evaluator_id: Option<Uuid>,
    pub status: Option<EvaluationStatus>,
}

impl From<EvaluationQuery> for EvaluationFilter {
    fn from(q: EvaluationQuery) -> Self {
        Self {
            cycle_id: q.cycle_id,
            employee_id: q.employee_id,
            evaluator_id: q.evaluator_id,
            status: q.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SaveScoresRequest {
    pub entries: Vec<ScoreEntry>,
    /// Also moves the evaluation to `submitted`; requires exactly 100 credits.
    #[serde(default)]
    pub submit: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusRequest {
    pub status: EvaluationStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluationResponse {
    pub evaluation_id: Uuid,
    pub cycle_id: Uuid,
    pub evaluated_employee_id: Uuid,
    pub evaluator_id: Uuid,
    pub status: EvaluationStatus,
    #[schema(value_type = Option<String>, example = "3.50")]
    pub total_score: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<evaluation::Model> for EvaluationResponse {
    fn from(e: evaluation::Model) -> Self {
        Self {
            evaluation_id: e.evaluation_id,
            cycle_id: e.cycle_id,
            evaluated_employee_id: e.evaluated_employee_id,
            evaluator_id: e.evaluator_id,
            status: e.status,
            total_score: e.total_score,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluationListResponse {
    pub total: usize,
    pub evaluations: Vec<EvaluationResponse>,
}

impl From<Vec<evaluation::Model>> for EvaluationListResponse {
    fn from(models: Vec<evaluation::Model>) -> Self {
        Self {
            total: models.len(),
            evaluations: models.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sheet as computed on save. `validation_message` is set while the credits do not add up to 100.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreSheetResponse {
    pub evaluation: EvaluationResponse,
    pub entries: Vec<WeightedEntry>,
    pub total_weight: i32,
    #[schema(value_type = String, example = "3.50")]
    pub total_score: Decimal,
    pub is_complete: bool,
    pub validation_message: Option<String>,
}

impl From<SavedSheet> for ScoreSheetResponse {
    fn from(saved: SavedSheet) -> Self {
        let is_complete = saved.sheet.is_complete();
        let validation_message = saved.sheet.validation_message();
        Self {
            evaluation: saved.evaluation.into(),
            entries: saved.sheet.entries,
            total_weight: saved.sheet.total_weight,
            total_score: saved.sheet.total_score,
            is_complete,
            validation_message,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoredScoreResponse {
    pub evaluation_score_id: Uuid,
    pub competency_id: Uuid,
    pub weight: i32,
    pub rating: i32,
    #[schema(value_type = String, example = "1.25")]
    pub weighted_score: Decimal,
}

impl From<evaluation_score::Model> for StoredScoreResponse {
    fn from(s: evaluation_score::Model) -> Self {
        Self {
            evaluation_score_id: s.evaluation_score_id,
            competency_id: s.competency_id,
            weight: s.weight,
            rating: s.score,
            weighted_score: s.weighted_score,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoredScoresResponse {
    pub evaluation_id: Uuid,
    pub total_weight: i32,
    pub scores: Vec<StoredScoreResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_defaults_to_false() {
        let request: SaveScoresRequest = serde_json::from_str(
            r#"{"entries":[{"competency_id":"6f1c1c8e-4c39-4d4b-9a8e-2d3f1f0b1a11","weight":100,"rating":4}]}"#,
        )
        .unwrap();
        assert!(!request.submit);
        assert_eq!(request.entries[0].rating, 4);
    }

    #[test]
    fn score_entries_reject_unknown_fields() {
        let result = serde_json::from_str::<SaveScoresRequest>(
            r#"{"entries":[{"competency_id":"6f1c1c8e-4c39-4d4b-9a8e-2d3f1f0b1a11","weight":100,"rating":4,"note":"x"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn status_uses_snake_case() {
        let request: UpdateStatusRequest =
            serde_json::from_str(r#"{"status":"submitted"}"#).unwrap();
        assert_eq!(request.status, EvaluationStatus::Submitted);
        assert!(serde_json::from_str::<UpdateStatusRequest>(r#"{"status":"archived"}"#).is_err());
    }
}
