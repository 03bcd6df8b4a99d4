//! `SeaORM` Entity for evaluation_score table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "evaluation_score"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub evaluation_score_id: Uuid,
    pub evaluation_id: Uuid,
    pub competency_id: Uuid,
    pub weight: i32,
    pub score: i32,
    pub weighted_score: Decimal,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    EvaluationScoreId,
    EvaluationId,
    CompetencyId,
    Weight,
    Score,
    WeightedScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    EvaluationScoreId,
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
    Competency,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::EvaluationScoreId => ColumnType::Uuid.def(),
            Self::EvaluationId => ColumnType::Uuid.def(),
            Self::CompetencyId => ColumnType::Uuid.def(),
            Self::Weight => ColumnType::Integer.def(),
            Self::Score => ColumnType::Integer.def(),
            Self::WeightedScore => ColumnType::Decimal(Some((5, 2))).def(),
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
            Self::Competency => Entity::belongs_to(super::competency::Entity)
                .from(Column::CompetencyId)
                .to(super::competency::Column::CompetencyId)
                .into(),
        }
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::competency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competency.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
