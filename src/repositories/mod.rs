use sea_orm::{DatabaseConnection, DbErr};

use crate::errors::{AppError, AppResult, is_unreachable};
use crate::static_service::DATABASE_CONNECTION;

pub mod competency_repository;
pub mod cycle_repository;
pub mod dashboard_repository;
pub mod employee_repository;
pub mod evaluation_repository;
pub mod nine_box_repository;
pub mod pdi_repository;
pub mod position_repository;
pub mod user_repository;

pub use competency_repository::{CompetencyRepository, CompetencyUpdate, NewCompetency};
pub use cycle_repository::{CycleRepository, CycleUpdate, NewCycle};
pub use dashboard_repository::{DashboardRepository, DashboardStats, RecentEvaluation};
pub use employee_repository::{EmployeeRepository, EmployeeUpdate, NewEmployee};
pub use evaluation_repository::{
    EvaluationFilter, EvaluationRepository, EvaluationUpdate, NewEvaluation, SavedSheet,
};
pub use nine_box_repository::{NineBoxInput, NineBoxRepository};
pub use pdi_repository::{PdiInput, PdiRepository};
pub use position_repository::{NewPosition, PositionRepository, PositionUpdate};
pub use user_repository::UserRepository;

/// Handle to the relational store, which may be absent.
///
/// Reads on a missing or unreachable store come back empty, writes fail
/// with [`AppError::StorageUnavailable`].
#[derive(Clone, Default)]
pub struct Store {
    db: Option<DatabaseConnection>,
}

impl Store {
    pub fn global() -> Self {
        Self {
            db: DATABASE_CONNECTION.get().cloned(),
        }
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db: Some(db) }
    }

    pub fn disconnected() -> Self {
        Self { db: None }
    }

    pub fn is_connected(&self) -> bool {
        self.db.is_some()
    }

    pub fn reader(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn writer(&self) -> AppResult<&DatabaseConnection> {
        self.db.as_ref().ok_or(AppError::StorageUnavailable)
    }
}

/// Turns a connection failure on a read into an empty result.
pub(crate) fn degrade<T: Default>(result: Result<T, DbErr>) -> AppResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if is_unreachable(&err) => {
            tracing::warn!("Read served empty, storage unreachable: {}", err);
            Ok(T::default())
        }
        Err(err) => Err(AppError::Database(err)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    pub fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn disconnected_store_refuses_writes() {
        let store = Store::disconnected();
        assert!(store.reader().is_none());
        assert!(matches!(store.writer(), Err(AppError::StorageUnavailable)));
    }

    #[test]
    fn unreachable_reads_degrade_to_default() {
        let result: AppResult<Vec<u8>> =
            degrade(Err(DbErr::Conn(RuntimeErr::Internal("refused".into()))));
        assert_eq!(result.unwrap(), Vec::<u8>::new());

        let result: AppResult<Option<u8>> = degrade(Err(DbErr::Custom("bad query".into())));
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
