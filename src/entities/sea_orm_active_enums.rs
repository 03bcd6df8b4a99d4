//! `SeaORM` active enums

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "master")]
    Master,
    #[sea_orm(string_value = "leader")]
    Leader,
    #[sea_orm(string_value = "employee")]
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Master => "master",
            UserRole::Leader => "leader",
            UserRole::Employee => "employee",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "access_level")]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[sea_orm(string_value = "premium")]
    Premium,
    #[sea_orm(string_value = "pleno")]
    Pleno,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Premium => "premium",
            AccessLevel::Pleno => "pleno",
        }
    }
}

/// Closed set of competency categories used by the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "competency_category")]
pub enum CompetencyCategory {
    #[sea_orm(string_value = "Cultural/Core")]
    #[serde(rename = "Cultural/Core")]
    CulturalCore,
    #[sea_orm(string_value = "Soft Skill (Atitude)")]
    #[serde(rename = "Soft Skill (Atitude)")]
    SoftSkillAttitude,
    #[sea_orm(string_value = "Soft Skill (Relacional)")]
    #[serde(rename = "Soft Skill (Relacional)")]
    SoftSkillRelational,
    #[sea_orm(string_value = "Soft Skill (Distintiva)")]
    #[serde(rename = "Soft Skill (Distintiva)")]
    SoftSkillDistinctive,
    #[sea_orm(string_value = "Hard Skill (Técnica)")]
    #[serde(rename = "Hard Skill (Técnica)")]
    HardSkillTechnical,
    #[sea_orm(string_value = "Results Skill")]
    #[serde(rename = "Results Skill")]
    ResultsSkill,
    #[sea_orm(string_value = "Liderança")]
    #[serde(rename = "Liderança")]
    Leadership,
}

impl CompetencyCategory {
    pub const ALL: [CompetencyCategory; 7] = [
        CompetencyCategory::CulturalCore,
        CompetencyCategory::SoftSkillAttitude,
        CompetencyCategory::SoftSkillRelational,
        CompetencyCategory::SoftSkillDistinctive,
        CompetencyCategory::HardSkillTechnical,
        CompetencyCategory::ResultsSkill,
        CompetencyCategory::Leadership,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CompetencyCategory::CulturalCore => "Cultural/Core",
            CompetencyCategory::SoftSkillAttitude => "Soft Skill (Atitude)",
            CompetencyCategory::SoftSkillRelational => "Soft Skill (Relacional)",
            CompetencyCategory::SoftSkillDistinctive => "Soft Skill (Distintiva)",
            CompetencyCategory::HardSkillTechnical => "Hard Skill (Técnica)",
            CompetencyCategory::ResultsSkill => "Results Skill",
            CompetencyCategory::Leadership => "Liderança",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cycle_status")]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    #[sea_orm(string_value = "planning")]
    Planning,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "evaluation_status")]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Draft => "draft",
            EvaluationStatus::Submitted => "submitted",
            EvaluationStatus::Completed => "completed",
        }
    }
}
