//! `SeaORM` Entity for nine_box table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "nine_box"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub nine_box_id: Uuid,
    pub evaluation_id: Uuid,
    pub employee_id: Uuid,
    pub performance: i32,
    pub potential: i32,
    pub classification: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    NineBoxId,
    EvaluationId,
    EmployeeId,
    Performance,
    Potential,
    Classification,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    NineBoxId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Evaluation,
    Employee,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::NineBoxId => ColumnType::Uuid.def(),
            Self::EvaluationId => ColumnType::Uuid.def().unique(),
            Self::EmployeeId => ColumnType::Uuid.def(),
            Self::Performance => ColumnType::Integer.def(),
            Self::Potential => ColumnType::Integer.def(),
            Self::Classification => ColumnType::String(StringLen::N(50u32)).def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Evaluation => Entity::belongs_to(super::evaluation::Entity)
                .from(Column::EvaluationId)
                .to(super::evaluation::Column::EvaluationId)
                .into(),
            Self::Employee => Entity::belongs_to(super::employee::Entity)
                .from(Column::EmployeeId)
                .to(super::employee::Column::EmployeeId)
                .into(),
        }
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
