//! `SeaORM` Entity for evaluation table

use super::sea_orm_active_enums::EvaluationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "evaluation"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub evaluation_id: Uuid,
    pub cycle_id: Uuid,
    pub evaluated_employee_id: Uuid,
    pub evaluator_id: Uuid,
    pub status: EvaluationStatus,
    pub total_score: Option<Decimal>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    EvaluationId,
    CycleId,
    EvaluatedEmployeeId,
    EvaluatorId,
    Status,
    TotalScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    EvaluationId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Cycle,
    EvaluatedEmployee,
    Evaluator,
    EvaluationScore,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::EvaluationId => ColumnType::Uuid.def(),
            Self::CycleId => ColumnType::Uuid.def(),
            Self::EvaluatedEmployeeId => ColumnType::Uuid.def(),
            Self::EvaluatorId => ColumnType::Uuid.def(),
            Self::Status => EvaluationStatus::db_type(),
            Self::TotalScore => ColumnType::Decimal(Some((5, 2))).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Cycle => Entity::belongs_to(super::evaluation_cycle::Entity)
                .from(Column::CycleId)
                .to(super::evaluation_cycle::Column::CycleId)
                .into(),
            Self::EvaluatedEmployee => Entity::belongs_to(super::employee::Entity)
                .from(Column::EvaluatedEmployeeId)
                .to(super::employee::Column::EmployeeId)
                .into(),
            Self::Evaluator => Entity::belongs_to(super::employee::Entity)
                .from(Column::EvaluatorId)
                .to(super::employee::Column::EmployeeId)
                .into(),
            Self::EvaluationScore => Entity::has_many(super::evaluation_score::Entity).into(),
        }
    }
}

impl Related<super::evaluation_cycle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cycle.def()
    }
}

impl Related<super::evaluation_score::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationScore.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
