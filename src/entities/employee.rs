//! `SeaORM` Entity for employee table

use super::sea_orm_active_enums::AccessLevel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "employee"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub employee_id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub badge: String,
    pub sector: String,
    pub email: String,
    pub cpf: String,
    pub position_id: Uuid,
    pub birth_date: Option<Date>,
    pub admission_date: Date,
    pub leader_id: Option<Uuid>,
    pub access_level: AccessLevel,
    pub last_access_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    EmployeeId,
    UserId,
    Name,
    Badge,
    Sector,
    Email,
    Cpf,
    PositionId,
    BirthDate,
    AdmissionDate,
    LeaderId,
    AccessLevel,
    LastAccessAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    EmployeeId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Position,
    Leader,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::EmployeeId => ColumnType::Uuid.def(),
            Self::UserId => ColumnType::Uuid.def().null(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::Badge => ColumnType::String(StringLen::N(50u32)).def().unique(),
            Self::Sector => ColumnType::String(StringLen::N(100u32)).def(),
            Self::Email => ColumnType::String(StringLen::N(320u32)).def(),
            Self::Cpf => ColumnType::String(StringLen::N(14u32)).def().unique(),
            Self::PositionId => ColumnType::Uuid.def(),
            Self::BirthDate => ColumnType::Date.def().null(),
            Self::AdmissionDate => ColumnType::Date.def(),
            Self::LeaderId => ColumnType::Uuid.def().null(),
            Self::AccessLevel => AccessLevel::db_type(),
            Self::LastAccessAt => ColumnType::DateTime.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::User => Entity::belongs_to(super::user::Entity)
                .from(Column::UserId)
                .to(super::user::Column::UserId)
                .into(),
            Self::Position => Entity::belongs_to(super::position::Entity)
                .from(Column::PositionId)
                .to(super::position::Column::PositionId)
                .into(),
            Self::Leader => Entity::belongs_to(Entity)
                .from(Column::LeaderId)
                .to(Column::EmployeeId)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
