use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{employee, sea_orm_active_enums::AccessLevel};
use crate::errors::{AppError, AppResult};
use crate::repositories::employee_repository::ensure_birth_before_admission;
use crate::repositories::{EmployeeUpdate, NewEmployee};
use crate::routes::{deserialize_some, optional_text, require_email, require_text};

const NAME_MAX: usize = 255;
const BADGE_MAX: usize = 50;
const SECTOR_MAX: usize = 100;

/// Accepts `12345678901` or `123.456.789-01`, stores the punctuated form.
pub fn normalize_cpf(value: &str) -> AppResult<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let only_cpf_chars = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | ' '));
    if digits.len() != 11 || !only_cpf_chars {
        return Err(AppError::validation("cpf must contain exactly 11 digits"));
    }
    Ok(format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    ))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateEmployeeRequest {
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = "EMP-0042")]
    pub badge: String,
    #[schema(example = "Finance")]
    pub sector: String,
    #[schema(example = "ana.souza@example.com")]
    pub email: String,
    #[schema(example = "123.456.789-01")]
    pub cpf: String,
    pub position_id: Uuid,
    pub birth_date: Option<NaiveDate>,
    pub admission_date: NaiveDate,
    pub leader_id: Option<Uuid>,
    pub access_level: Option<AccessLevel>,
    pub user_id: Option<Uuid>,
}

impl CreateEmployeeRequest {
    pub fn validate(self) -> AppResult<NewEmployee> {
        ensure_birth_before_admission(self.birth_date, self.admission_date)?;
        Ok(NewEmployee {
            name: require_text("name", &self.name, NAME_MAX)?,
            badge: require_text("badge", &self.badge, BADGE_MAX)?,
            sector: require_text("sector", &self.sector, SECTOR_MAX)?,
            email: require_email("email", &self.email)?,
            cpf: normalize_cpf(&self.cpf)?,
            position_id: self.position_id,
            birth_date: self.birth_date,
            admission_date: self.admission_date,
            leader_id: self.leader_id,
            access_level: self.access_level.unwrap_or(AccessLevel::Pleno),
            user_id: self.user_id,
        })
    }
}

/// Absent fields are left unchanged; `null` clears nullable ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub badge: Option<String>,
    pub sector: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub position_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<NaiveDate>)]
    pub birth_date: Option<Option<NaiveDate>>,
    pub admission_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Uuid>)]
    pub leader_id: Option<Option<Uuid>>,
    pub access_level: Option<AccessLevel>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Uuid>)]
    pub user_id: Option<Option<Uuid>>,
}

impl UpdateEmployeeRequest {
    pub fn validate(self) -> AppResult<EmployeeUpdate> {
        Ok(EmployeeUpdate {
            name: optional_text("name", self.name.as_deref(), NAME_MAX)?,
            badge: optional_text("badge", self.badge.as_deref(), BADGE_MAX)?,
            sector: optional_text("sector", self.sector.as_deref(), SECTOR_MAX)?,
            email: self
                .email
                .as_deref()
                .map(|email| require_email("email", email))
                .transpose()?,
            cpf: self.cpf.as_deref().map(normalize_cpf).transpose()?,
            position_id: self.position_id,
            birth_date: self.birth_date,
            admission_date: self.admission_date,
            leader_id: self.leader_id,
            access_level: self.access_level,
            user_id: self.user_id,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub employee_id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub badge: String,
    pub sector: String,
    pub email: String,
    pub cpf: String,
    pub position_id: Uuid,
    pub birth_date: Option<NaiveDate>,
    pub admission_date: NaiveDate,
    pub leader_id: Option<Uuid>,
    pub access_level: AccessLevel,
    pub last_access_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<employee::Model> for EmployeeResponse {
    fn from(e: employee::Model) -> Self {
        Self {
            employee_id: e.employee_id,
            user_id: e.user_id,
            name: e.name,
            badge: e.badge,
            sector: e.sector,
            email: e.email,
            cpf: e.cpf,
            position_id: e.position_id,
            birth_date: e.birth_date,
            admission_date: e.admission_date,
            leader_id: e.leader_id,
            access_level: e.access_level,
            last_access_at: e.last_access_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub total: usize,
    pub employees: Vec<EmployeeResponse>,
}

impl From<Vec<employee::Model>> for EmployeeListResponse {
    fn from(models: Vec<employee::Model>) -> Self {
        Self {
            total: models.len(),
            employees: models.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteEmployeeResponse {
    pub employee_id: Uuid,
    /// Direct reports left without a leader
    pub detached_subordinates: u64,
}
