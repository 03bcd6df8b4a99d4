use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{evaluation_cycle, sea_orm_active_enums::CycleStatus};
use crate::errors::AppResult;
use crate::repositories::{CycleUpdate, NewCycle};
use crate::routes::{optional_text, require_text};

const NAME_MAX: usize = 255;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCycleRequest {
    #[schema(example = "2025 annual review")]
    pub name: String,
    #[schema(example = "2025-01-01")]
    pub start_date: NaiveDate,
    #[schema(example = "2025-12-31")]
    pub end_date: NaiveDate,
    pub status: Option<CycleStatus>,
}

impl CreateCycleRequest {
    pub fn validate(self) -> AppResult<NewCycle> {
        Ok(NewCycle {
            name: require_text("name", &self.name, NAME_MAX)?,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status.unwrap_or(CycleStatus::Planning),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCycleRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CycleStatus>,
}

impl UpdateCycleRequest {
    pub fn validate(self) -> AppResult<CycleUpdate> {
        Ok(CycleUpdate {
            name: optional_text("name", self.name.as_deref(), NAME_MAX)?,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CycleResponse {
    pub cycle_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CycleStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<evaluation_cycle::Model> for CycleResponse {
    fn from(c: evaluation_cycle::Model) -> Self {
        Self {
            cycle_id: c.cycle_id,
            name: c.name,
            start_date: c.start_date,
            end_date: c.end_date,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CycleListResponse {
    pub total: usize,
    pub cycles: Vec<CycleResponse>,
}
