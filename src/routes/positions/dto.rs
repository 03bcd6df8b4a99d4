use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::position;
use crate::errors::AppResult;
use crate::repositories::{NewPosition, PositionUpdate};
use crate::routes::{optional_text, require_text};

const TITLE_MAX: usize = 255;
const TEXT_MAX: usize = 4000;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePositionRequest {
    #[schema(example = "Data Analyst")]
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub competency_ids: Vec<Uuid>,
}

impl CreatePositionRequest {
    pub fn validate(self) -> AppResult<NewPosition> {
        Ok(NewPosition {
            title: require_text("title", &self.title, TITLE_MAX)?,
            description: optional_text("description", self.description.as_deref(), TEXT_MAX)?,
            requirements: optional_text("requirements", self.requirements.as_deref(), TEXT_MAX)?,
            competency_ids: self.competency_ids,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePositionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    /// Replaces the linked competencies when present
    pub competency_ids: Option<Vec<Uuid>>,
}

impl UpdatePositionRequest {
    pub fn validate(self) -> AppResult<PositionUpdate> {
        Ok(PositionUpdate {
            title: optional_text("title", self.title.as_deref(), TITLE_MAX)?,
            description: optional_text("description", self.description.as_deref(), TEXT_MAX)?,
            requirements: optional_text("requirements", self.requirements.as_deref(), TEXT_MAX)?,
            competency_ids: self.competency_ids,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionResponse {
    pub position_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<position::Model> for PositionResponse {
    fn from(p: position::Model) -> Self {
        Self {
            position_id: p.position_id,
            title: p.title,
            description: p.description,
            requirements: p.requirements,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionListResponse {
    pub total: usize,
    pub positions: Vec<PositionResponse>,
}
