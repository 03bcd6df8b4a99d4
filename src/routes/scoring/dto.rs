use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ScoreEntry, ScoreSheet, WeightedEntry};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ScorePreviewRequest {
    pub entries: Vec<ScoreEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScorePreviewResponse {
    pub entries: Vec<WeightedEntry>,
    pub total_weight: i32,
    pub remaining_credits: i32,
    #[schema(value_type = String, example = "3.50")]
    pub total_score: Decimal,
    pub is_complete: bool,
    pub validation_message: Option<String>,
}

impl From<ScoreSheet> for ScorePreviewResponse {
    fn from(sheet: ScoreSheet) -> Self {
        Self {
            is_complete: sheet.is_complete(),
            validation_message: sheet.validation_message(),
            remaining_credits: crate::domain::scoring::TOTAL_CREDITS - sheet.total_weight,
            total_weight: sheet.total_weight,
            total_score: sheet.total_score,
            entries: sheet.entries,
        }
    }
}
