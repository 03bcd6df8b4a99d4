use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::pdi;
use crate::errors::AppResult;
use crate::repositories::PdiInput;

const SECTION_MAX: usize = 10_000;

/// Empty or whitespace-only sections are stored as absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PdiRequest {
    pub strengths: Option<String>,
    pub improvement_areas: Option<String>,
    pub development_plan: Option<String>,
    pub feedback: Option<String>,
}

fn section(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value.trim().is_empty() {
        return Ok(None);
    }
    crate::routes::require_text(field, &value, SECTION_MAX).map(Some)
}

impl PdiRequest {
    pub fn validate(self) -> AppResult<PdiInput> {
        Ok(PdiInput {
            strengths: section("strengths", self.strengths)?,
            improvement_areas: section("improvement_areas", self.improvement_areas)?,
            development_plan: section("development_plan", self.development_plan)?,
            feedback: section("feedback", self.feedback)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PdiQuery {
    pub employee_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PdiResponse {
    pub pdi_id: Uuid,
    pub evaluation_id: Uuid,
    pub employee_id: Uuid,
    pub strengths: Option<String>,
    pub improvement_areas: Option<String>,
    pub development_plan: Option<String>,
    pub feedback: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<pdi::Model> for PdiResponse {
    fn from(p: pdi::Model) -> Self {
        Self {
            pdi_id: p.pdi_id,
            evaluation_id: p.evaluation_id,
            employee_id: p.employee_id,
            strengths: p.strengths,
            improvement_areas: p.improvement_areas,
            development_plan: p.development_plan,
            feedback: p.feedback,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PdiListResponse {
    pub total: usize,
    pub pdis: Vec<PdiResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_sections_are_dropped_and_text_is_trimmed() {
        let request = PdiRequest {
            strengths: Some("  Negotiation ".into()),
            improvement_areas: Some("   ".into()),
            development_plan: None,
            feedback: Some("Keep going".into()),
        };
        let input = request.validate().unwrap();
        assert_eq!(input.strengths.as_deref(), Some("Negotiation"));
        assert_eq!(input.improvement_areas, None);
        assert_eq!(input.development_plan, None);
        assert_eq!(input.feedback.as_deref(), Some("Keep going"));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(serde_json::from_str::<PdiRequest>(r#"{"goals":"x"}"#).is_err());
    }
}
