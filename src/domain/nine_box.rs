//! Nine-box talent grid: performance against potential.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NineBoxError {
    #[error("{axis} must be 1, 2 or 3 (got {value})")]
    LevelOutOfRange { axis: &'static str, value: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    pub fn value(self) -> i32 {
        match self {
            Level::Low => 1,
            Level::Medium => 2,
            Level::High => 3,
        }
    }

    pub fn parse(axis: &'static str, value: i32) -> Result<Self, NineBoxError> {
        match value {
            1 => Ok(Level::Low),
            2 => Ok(Level::Medium),
            3 => Ok(Level::High),
            _ => Err(NineBoxError::LevelOutOfRange { axis, value }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NineBoxCategory {
    Reposition,
    Maintenance,
    SeniorSpecialist,
    InDevelopment,
    StableCore,
    Specialist,
    Promising,
    CoreGrowth,
    TopTalent,
}

impl NineBoxCategory {
    pub const ALL: [NineBoxCategory; 9] = [
        NineBoxCategory::Reposition,
        NineBoxCategory::Maintenance,
        NineBoxCategory::SeniorSpecialist,
        NineBoxCategory::InDevelopment,
        NineBoxCategory::StableCore,
        NineBoxCategory::Specialist,
        NineBoxCategory::Promising,
        NineBoxCategory::CoreGrowth,
        NineBoxCategory::TopTalent,
    ];

    /// Display label, at most 50 characters to fit the stored column.
    pub fn label(self) -> &'static str {
        match self {
            NineBoxCategory::Reposition => "Reposition",
            NineBoxCategory::Maintenance => "Maintenance",
            NineBoxCategory::SeniorSpecialist => "Senior Specialist",
            NineBoxCategory::InDevelopment => "In Development",
            NineBoxCategory::StableCore => "Stable Core",
            NineBoxCategory::Specialist => "Specialist",
            NineBoxCategory::Promising => "Promising - Invest in Development",
            NineBoxCategory::CoreGrowth => "Core - Maintain and Develop",
            NineBoxCategory::TopTalent => "Top Talent - High Potential",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Grid coordinates of the bucket as `(performance, potential)`.
    pub fn cell(self) -> (Level, Level) {
        match self {
            NineBoxCategory::Reposition => (Level::Low, Level::Low),
            NineBoxCategory::Maintenance => (Level::Medium, Level::Low),
            NineBoxCategory::SeniorSpecialist => (Level::High, Level::Low),
            NineBoxCategory::InDevelopment => (Level::Low, Level::Medium),
            NineBoxCategory::StableCore => (Level::Medium, Level::Medium),
            NineBoxCategory::Specialist => (Level::High, Level::Medium),
            NineBoxCategory::Promising => (Level::Low, Level::High),
            NineBoxCategory::CoreGrowth => (Level::Medium, Level::High),
            NineBoxCategory::TopTalent => (Level::High, Level::High),
        }
    }
}

pub fn classify(performance: Level, potential: Level) -> NineBoxCategory {
    match (performance, potential) {
        (Level::Low, Level::Low) => NineBoxCategory::Reposition,
        (Level::Medium, Level::Low) => NineBoxCategory::Maintenance,
        (Level::High, Level::Low) => NineBoxCategory::SeniorSpecialist,
        (Level::Low, Level::Medium) => NineBoxCategory::InDevelopment,
        (Level::Medium, Level::Medium) => NineBoxCategory::StableCore,
        (Level::High, Level::Medium) => NineBoxCategory::Specialist,
        (Level::Low, Level::High) => NineBoxCategory::Promising,
        (Level::Medium, Level::High) => NineBoxCategory::CoreGrowth,
        (Level::High, Level::High) => NineBoxCategory::TopTalent,
    }
}

/// Classifies raw 1..=3 values as stored in the database.
pub fn classify_values(performance: i32, potential: i32) -> Result<NineBoxCategory, NineBoxError> {
    let performance = Level::parse("performance", performance)?;
    let potential = Level::parse("potential", potential)?;
    Ok(classify(performance, potential))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_cell_has_a_distinct_non_empty_label() {
        let mut labels = HashSet::new();
        for performance in Level::ALL {
            for potential in Level::ALL {
                let category = classify(performance, potential);
                assert!(!category.label().is_empty());
                assert!(category.label().len() <= 50);
                assert_eq!(category.cell(), (performance, potential));
                labels.insert(category.label());
            }
        }
        assert_eq!(labels.len(), 9);
    }

    #[test]
    fn corners_and_centre() {
        let top = classify_values(3, 3).unwrap();
        let bottom = classify_values(1, 1).unwrap();
        let core = classify_values(2, 2).unwrap();

        assert_eq!(top, NineBoxCategory::TopTalent);
        assert_eq!(bottom, NineBoxCategory::Reposition);
        assert_eq!(core, NineBoxCategory::StableCore);
        assert_ne!(top.label(), core.label());
        assert_ne!(bottom.label(), core.label());
    }

    #[test]
    fn specialists_sit_on_high_performance() {
        assert_eq!(classify_values(3, 2).unwrap(), NineBoxCategory::Specialist);
        assert_eq!(classify_values(3, 1).unwrap(), NineBoxCategory::SeniorSpecialist);
    }

    #[test]
    fn values_outside_the_grid_are_rejected() {
        assert_eq!(
            classify_values(0, 2),
            Err(NineBoxError::LevelOutOfRange {
                axis: "performance",
                value: 0
            })
        );
        assert_eq!(
            classify_values(2, 4),
            Err(NineBoxError::LevelOutOfRange {
                axis: "potential",
                value: 4
            })
        );
    }

    #[test]
    fn labels_resolve_back_to_categories() {
        for category in NineBoxCategory::ALL {
            assert_eq!(NineBoxCategory::from_label(category.label()), Some(category));
        }
    }
}
