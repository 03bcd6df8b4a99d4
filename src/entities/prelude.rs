//! `SeaORM` entity prelude

pub use super::competency::Entity as Competency;
pub use super::employee::Entity as Employee;
pub use super::evaluation::Entity as Evaluation;
pub use super::evaluation_cycle::Entity as EvaluationCycle;
pub use super::evaluation_score::Entity as EvaluationScore;
pub use super::nine_box::Entity as NineBox;
pub use super::pdi::Entity as Pdi;
pub use super::position::Entity as Position;
pub use super::position_competency::Entity as PositionCompetency;
pub use super::user::Entity as User;
