pub mod hierarchy;
pub mod nine_box;
pub mod scoring;
pub mod workflow;

pub use hierarchy::{HierarchyError, LeadershipGraph};
pub use nine_box::{Level, NineBoxCategory, NineBoxError, classify, classify_values};
pub use scoring::{ScoreEntry, ScoreSheet, ScoringError, WeightedEntry};
pub use workflow::WorkflowError;
