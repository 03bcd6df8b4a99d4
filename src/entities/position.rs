//! `SeaORM` Entity for position table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "position"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub position_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    PositionId,
    Title,
    Description,
    Requirements,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    PositionId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Employee,
    PositionCompetency,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::PositionId => ColumnType::Uuid.def(),
            Self::Title => ColumnType::String(StringLen::N(150u32)).def(),
            Self::Description => ColumnType::Text.def().null(),
            Self::Requirements => ColumnType::Text.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Employee => Entity::has_many(super::employee::Entity).into(),
            Self::PositionCompetency => Entity::has_many(super::position_competency::Entity).into(),
        }
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::position_competency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PositionCompetency.def()
    }
}

impl Related<super::competency::Entity> for Entity {
    fn to() -> RelationDef {
        super::position_competency::Relation::Competency.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::position_competency::Relation::Position.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
