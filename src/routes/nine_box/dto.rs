use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::NineBoxCategory;
use crate::entities::nine_box;
use crate::repositories::NineBoxInput;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NineBoxRequest {
    /// 1 low, 2 medium, 3 high
    #[schema(example = 3, minimum = 1, maximum = 3)]
    pub performance: i32,
    #[schema(example = 2, minimum = 1, maximum = 3)]
    pub potential: i32,
}

impl From<NineBoxRequest> for NineBoxInput {
    fn from(r: NineBoxRequest) -> Self {
        Self {
            performance: r.performance,
            potential: r.potential,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NineBoxQuery {
    pub employee_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NineBoxResponse {
    pub nine_box_id: Uuid,
    pub evaluation_id: Uuid,
    pub employee_id: Uuid,
    pub performance: i32,
    pub potential: i32,
    pub classification: String,
    pub category: Option<NineBoxCategory>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<nine_box::Model> for NineBoxResponse {
    fn from(n: nine_box::Model) -> Self {
        Self {
            category: NineBoxCategory::from_label(&n.classification),
            nine_box_id: n.nine_box_id,
            evaluation_id: n.evaluation_id,
            employee_id: n.employee_id,
            performance: n.performance,
            potential: n.potential,
            classification: n.classification,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NineBoxListResponse {
    pub total: usize,
    pub records: Vec<NineBoxResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NineBoxCell {
    pub category: NineBoxCategory,
    pub label: &'static str,
    pub performance: i32,
    pub potential: i32,
    pub records: Vec<NineBoxResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NineBoxGridResponse {
    pub total: usize,
    pub cells: Vec<NineBoxCell>,
}

impl NineBoxGridResponse {
    /// All nine cells, in grid order, each holding the records classified into it.
    pub fn from_records(records: Vec<nine_box::Model>) -> Self {
        let total = records.len();
        let mut cells: Vec<NineBoxCell> = NineBoxCategory::ALL
            .into_iter()
            .map(|category| {
                let (performance, potential) = category.cell();
                NineBoxCell {
                    category,
                    label: category.label(),
                    performance: performance.value(),
                    potential: potential.value(),
                    records: Vec::new(),
                }
            })
            .collect();

        for record in records {
            let slot = cells
                .iter_mut()
                .find(|c| c.performance == record.performance && c.potential == record.potential);
            match slot {
                Some(cell) => cell.records.push(record.into()),
                None => tracing::warn!(
                    "Nine-box record {} has out of grid values ({}, {})",
                    record.nine_box_id,
                    record.performance,
                    record.potential
                ),
            }
        }

        Self { total, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::timestamp;

    fn record(performance: i32, potential: i32, classification: &str) -> nine_box::Model {
        nine_box::Model {
            nine_box_id: Uuid::new_v4(),
            evaluation_id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            performance,
            potential,
            classification: classification.to_string(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn grid_always_has_nine_cells() {
        let grid = NineBoxGridResponse::from_records(Vec::new());
        assert_eq!(grid.total, 0);
        assert_eq!(grid.cells.len(), 9);
        assert!(grid.cells.iter().all(|c| c.records.is_empty()));
    }

    #[test]
    fn records_land_in_their_cell() {
        let grid = NineBoxGridResponse::from_records(vec![
            record(3, 3, NineBoxCategory::TopTalent.label()),
            record(3, 3, NineBoxCategory::TopTalent.label()),
            record(1, 2, NineBoxCategory::InDevelopment.label()),
        ]);

        let top = grid
            .cells
            .iter()
            .find(|c| c.category == NineBoxCategory::TopTalent)
            .unwrap();
        assert_eq!(top.records.len(), 2);
        assert_eq!((top.performance, top.potential), (3, 3));

        let developing = grid
            .cells
            .iter()
            .find(|c| c.category == NineBoxCategory::InDevelopment)
            .unwrap();
        assert_eq!(developing.records.len(), 1);
        assert_eq!(developing.records[0].category, Some(NineBoxCategory::InDevelopment));
    }

    #[test]
    fn stale_labels_still_resolve_by_position() {
        let grid = NineBoxGridResponse::from_records(vec![record(2, 2, "Legacy label")]);
        let core = grid
            .cells
            .iter()
            .find(|c| c.category == NineBoxCategory::StableCore)
            .unwrap();
        assert_eq!(core.records.len(), 1);
        assert_eq!(core.records[0].category, None);
    }
}
