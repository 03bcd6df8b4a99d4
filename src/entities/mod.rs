//! `SeaORM` entities

pub mod prelude;

pub mod competency;
pub mod employee;
pub mod evaluation;
pub mod evaluation_cycle;
pub mod evaluation_score;
pub mod nine_box;
pub mod pdi;
pub mod position;
pub mod position_competency;
pub mod sea_orm_active_enums;
pub mod user;
