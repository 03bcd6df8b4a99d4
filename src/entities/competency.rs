//! `SeaORM` Entity for competency table

use super::sea_orm_active_enums::CompetencyCategory;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "competency"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub competency_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: CompetencyCategory,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    CompetencyId,
    Name,
    Description,
    Category,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    CompetencyId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    PositionCompetency,
    EvaluationScore,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::CompetencyId => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::N(150u32)).def(),
            Self::Description => ColumnType::Text.def().null(),
            Self::Category => CompetencyCategory::db_type(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::PositionCompetency => Entity::has_many(super::position_competency::Entity).into(),
            Self::EvaluationScore => Entity::has_many(super::evaluation_score::Entity).into(),
        }
    }
}

impl Related<super::position_competency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PositionCompetency.def()
    }
}

impl Related<super::evaluation_score::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationScore.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        super::position_competency::Relation::Position.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::position_competency::Relation::Competency.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
