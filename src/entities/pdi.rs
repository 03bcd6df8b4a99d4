//! `SeaORM` Entity for pdi table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "pdi"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub pdi_id: Uuid,
    pub evaluation_id: Uuid,
    pub employee_id: Uuid,
    pub strengths: Option<String>,
    pub improvement_areas: Option<String>,
    pub development_plan: Option<String>,
    pub feedback: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    PdiId,
    EvaluationId,
    EmployeeId,
    Strengths,
    ImprovementAreas,
    DevelopmentPlan,
    Feedback,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    PdiId,
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
            Self::PdiId => ColumnType::Uuid.def(),
            Self::EvaluationId => ColumnType::Uuid.def().unique(),
            Self::EmployeeId => ColumnType::Uuid.def(),
            Self::Strengths => ColumnType::Text.def().null(),
            Self::ImprovementAreas => ColumnType::Text.def().null(),
            Self::DevelopmentPlan => ColumnType::Text.def().null(),
            Self::Feedback => ColumnType::Text.def().null(),
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
