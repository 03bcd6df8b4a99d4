use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::{competency, sea_orm_active_enums::CompetencyCategory};
use crate::errors::AppResult;
use crate::repositories::{CompetencyUpdate, NewCompetency};
use crate::routes::{optional_text, require_text};

const NAME_MAX: usize = 255;
const DESCRIPTION_MAX: usize = 2000;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCompetencyRequest {
    #[schema(example = "Clear communication")]
    pub name: String,
    pub description: Option<String>,
    pub category: CompetencyCategory,
}

impl CreateCompetencyRequest {
    pub fn validate(self) -> AppResult<NewCompetency> {
        Ok(NewCompetency {
            name: require_text("name", &self.name, NAME_MAX)?,
            description: optional_text("description", self.description.as_deref(), DESCRIPTION_MAX)?,
            category: self.category,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCompetencyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<CompetencyCategory>,
}

impl UpdateCompetencyRequest {
    pub fn validate(self) -> AppResult<CompetencyUpdate> {
        Ok(CompetencyUpdate {
            name: optional_text("name", self.name.as_deref(), NAME_MAX)?,
            description: optional_text("description", self.description.as_deref(), DESCRIPTION_MAX)?,
            category: self.category,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CompetencyQuery {
    /// Category label, e.g. `Liderança`
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompetencyResponse {
    pub competency_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: CompetencyCategory,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<competency::Model> for CompetencyResponse {
    fn from(c: competency::Model) -> Self {
        Self {
            competency_id: c.competency_id,
            name: c.name,
            description: c.description,
            category: c.category,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompetencyListResponse {
    pub total: usize,
    pub competencies: Vec<CompetencyResponse>,
}

impl From<Vec<competency::Model>> for CompetencyListResponse {
    fn from(models: Vec<competency::Model>) -> Self {
        Self {
            total: models.len(),
            competencies: models.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_must_come_from_the_closed_set() {
        let ok = serde_json::from_str::<CreateCompetencyRequest>(
            r#"{"name":"Ownership","category":"Cultural/Core"}"#,
        );
        assert!(ok.is_ok());

        let unknown = serde_json::from_str::<CreateCompetencyRequest>(
            r#"{"name":"Ownership","category":"Vibes"}"#,
        );
        assert!(unknown.is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        let request = CreateCompetencyRequest {
            name: "  ".into(),
            description: None,
            category: CompetencyCategory::ResultsSkill,
        };
        assert!(request.validate().is_err());
    }
}
