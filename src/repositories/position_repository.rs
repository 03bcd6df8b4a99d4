use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{Store, degrade};
use crate::entities::{competency, employee, position, position_competency};
use crate::errors::{AppError, AppResult};

pub struct PositionRepository {
    store: Store,
}

pub struct NewPosition {
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub competency_ids: Vec<Uuid>,
}

#[derive(Default)]
pub struct PositionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    /// Replaces the whole competency set when present.
    pub competency_ids: Option<Vec<Uuid>>,
}

impl PositionRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> AppResult<Vec<position::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        degrade(
            position::Entity::find()
                .order_by_asc(position::Column::Title)
                .all(db)
                .await,
        )
    }

    pub async fn find_by_id(&self, position_id: Uuid) -> AppResult<Option<position::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(position::Entity::find_by_id(position_id).one(db).await)
    }

    /// Competencies required by a position, by name.
    pub async fn competencies(&self, position_id: Uuid) -> AppResult<Vec<competency::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        let Some(position) = degrade(position::Entity::find_by_id(position_id).one(db).await)?
        else {
            return Ok(Vec::new());
        };
        degrade(
            position
                .find_related(competency::Entity)
                .order_by_asc(competency::Column::Name)
                .all(db)
                .await,
        )
    }

    pub async fn create(&self, new: NewPosition) -> AppResult<position::Model> {
        let db = self.store.writer()?;
        let competency_ids = dedup(new.competency_ids);
        ensure_competencies_exist(db, &competency_ids).await?;

        let now = Utc::now().naive_utc();
        let position_id = Uuid::new_v4();

        let txn = db.begin().await?;
        let created = position::ActiveModel {
            position_id: Set(position_id),
            title: Set(new.title),
            description: Set(new.description),
            requirements: Set(new.requirements),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        insert_links(&txn, position_id, &competency_ids).await?;
        txn.commit().await?;

        Ok(created)
    }

    pub async fn update(
        &self,
        position_id: Uuid,
        updates: PositionUpdate,
    ) -> AppResult<position::Model> {
        let db = self.store.writer()?;
        let position = position::Entity::find_by_id(position_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Position"))?;

        let competency_ids = updates.competency_ids.map(dedup);
        if let Some(ids) = &competency_ids {
            ensure_competencies_exist(db, ids).await?;
        }

        let mut active: position::ActiveModel = position.into();
        if let Some(title) = updates.title {
            active.title = Set(title);
        }
        if let Some(description) = updates.description {
            active.description = Set(Some(description));
        }
        if let Some(requirements) = updates.requirements {
            active.requirements = Set(Some(requirements));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let txn = db.begin().await?;
        let updated = active.update(&txn).await?;
        if let Some(ids) = competency_ids {
            position_competency::Entity::delete_many()
                .filter(position_competency::Column::PositionId.eq(position_id))
                .exec(&txn)
                .await?;
            insert_links(&txn, position_id, &ids).await?;
        }
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes a position nobody holds. Competency links go with it.
    pub async fn delete(&self, position_id: Uuid) -> AppResult<()> {
        let db = self.store.writer()?;
        let position = position::Entity::find_by_id(position_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Position"))?;

        let holders = employee::Entity::find()
            .filter(employee::Column::PositionId.eq(position_id))
            .count(db)
            .await?;
        if holders > 0 {
            return Err(AppError::Referential(format!(
                "Position is held by {holders} employees"
            )));
        }

        position.delete(db).await?;
        Ok(())
    }
}

fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

async fn ensure_competencies_exist<C: sea_orm::ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: HashSet<Uuid> = competency::Entity::find()
        .filter(competency::Column::CompetencyId.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|c| c.competency_id)
        .collect();

    match ids.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(AppError::not_found(format!("Competency {missing}"))),
        None => Ok(()),
    }
}

async fn insert_links<C: sea_orm::ConnectionTrait>(
    db: &C,
    position_id: Uuid,
    competency_ids: &[Uuid],
) -> AppResult<()> {
    if competency_ids.is_empty() {
        return Ok(());
    }
    let now = Utc::now().naive_utc();
    let links = competency_ids
        .iter()
        .map(|competency_id| position_competency::ActiveModel {
            position_competency_id: Set(Uuid::new_v4()),
            position_id: Set(position_id),
            competency_id: Set(*competency_id),
            created_at: Set(now),
        });
    position_competency::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;
    Ok(())
}
