use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use uuid::Uuid;

use super::{Store, degrade};
use crate::entities::{evaluation_cycle, sea_orm_active_enums::CycleStatus};
use crate::errors::{AppError, AppResult};

pub struct CycleRepository {
    store: Store,
}

pub struct NewCycle {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CycleStatus,
}

#[derive(Default)]
pub struct CycleUpdate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CycleStatus>,
}

pub fn ensure_date_order(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<()> {
    if end_date < start_date {
        return Err(AppError::validation(format!(
            "end_date {end_date} precedes start_date {start_date}"
        )));
    }
    Ok(())
}

impl CycleRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// Most recent cycles first.
    pub async fn find_all(&self) -> AppResult<Vec<evaluation_cycle::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        degrade(
            evaluation_cycle::Entity::find()
                .order_by_desc(evaluation_cycle::Column::StartDate)
                .all(db)
                .await,
        )
    }

    pub async fn find_by_id(&self, cycle_id: Uuid) -> AppResult<Option<evaluation_cycle::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(evaluation_cycle::Entity::find_by_id(cycle_id).one(db).await)
    }

    pub async fn create(&self, new: NewCycle) -> AppResult<evaluation_cycle::Model> {
        ensure_date_order(new.start_date, new.end_date)?;
        let db = self.store.writer()?;
        let now = Utc::now().naive_utc();
        let model = evaluation_cycle::ActiveModel {
            cycle_id: Set(Uuid::new_v4()),
            name: Set(new.name),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(db).await?)
    }

    pub async fn update(
        &self,
        cycle_id: Uuid,
        updates: CycleUpdate,
    ) -> AppResult<evaluation_cycle::Model> {
        let db = self.store.writer()?;
        let cycle = evaluation_cycle::Entity::find_by_id(cycle_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Evaluation cycle"))?;

        ensure_date_order(
            updates.start_date.unwrap_or(cycle.start_date),
            updates.end_date.unwrap_or(cycle.end_date),
        )?;

        let mut active: evaluation_cycle::ActiveModel = cycle.into();
        if let Some(name) = updates.name {
            active.name = Set(name);
        }
        if let Some(start_date) = updates.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = updates.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(status) = updates.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Deleting a cycle removes its evaluations with it.
    pub async fn delete(&self, cycle_id: Uuid) -> AppResult<()> {
        let db = self.store.writer()?;
        let cycle = evaluation_cycle::Entity::find_by_id(cycle_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Evaluation cycle"))?;
        cycle.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{date, timestamp};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn cycle(start: NaiveDate, end: NaiveDate) -> evaluation_cycle::Model {
        evaluation_cycle::Model {
            cycle_id: Uuid::new_v4(),
            name: "2025 H1".to_string(),
            start_date: start,
            end_date: end,
            status: CycleStatus::Planning,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn same_day_cycles_are_allowed() {
        assert!(ensure_date_order(date(2025, 1, 1), date(2025, 1, 1)).is_ok());
        assert!(ensure_date_order(date(2025, 6, 30), date(2025, 1, 1)).is_err());
    }

    #[tokio::test]
    async fn inverted_dates_are_rejected_before_touching_storage() {
        let repo = CycleRepository::with_store(Store::disconnected());
        let err = repo
            .create(NewCycle {
                name: "Backwards".into(),
                start_date: date(2025, 6, 30),
                end_date: date(2025, 1, 1),
                status: CycleStatus::Planning,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn partial_update_is_checked_against_stored_dates() {
        let stored = cycle(date(2025, 1, 1), date(2025, 6, 30));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let repo = CycleRepository::with_store(Store::from_connection(db));

        let err = repo
            .update(
                stored.cycle_id,
                CycleUpdate {
                    end_date: Some(date(2024, 12, 31)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
