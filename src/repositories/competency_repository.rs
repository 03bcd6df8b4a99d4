use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{Store, degrade};
use crate::entities::{competency, evaluation_score, sea_orm_active_enums::CompetencyCategory};
use crate::errors::{AppError, AppResult};

pub struct CompetencyRepository {
    store: Store,
}

pub struct NewCompetency {
    pub name: String,
    pub description: Option<String>,
    pub category: CompetencyCategory,
}

#[derive(Default)]
pub struct CompetencyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<CompetencyCategory>,
}

impl CompetencyRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_all(
        &self,
        category: Option<CompetencyCategory>,
    ) -> AppResult<Vec<competency::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        let mut query = competency::Entity::find();
        if let Some(category) = category {
            query = query.filter(competency::Column::Category.eq(category));
        }
        degrade(query.order_by_asc(competency::Column::Name).all(db).await)
    }

    pub async fn find_by_id(&self, competency_id: Uuid) -> AppResult<Option<competency::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(competency::Entity::find_by_id(competency_id).one(db).await)
    }

    pub async fn create(&self, new: NewCompetency) -> AppResult<competency::Model> {
        let db = self.store.writer()?;
        let now = Utc::now().naive_utc();
        let model = competency::ActiveModel {
            competency_id: Set(Uuid::new_v4()),
            name: Set(new.name),
            description: Set(new.description),
            category: Set(new.category),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(db).await?)
    }

    pub async fn update(
        &self,
        competency_id: Uuid,
        updates: CompetencyUpdate,
    ) -> AppResult<competency::Model> {
        let db = self.store.writer()?;
        let competency = competency::Entity::find_by_id(competency_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Competency"))?;

        let mut active: competency::ActiveModel = competency.into();
        if let Some(name) = updates.name {
            active.name = Set(name);
        }
        if let Some(description) = updates.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = updates.category {
            active.category = Set(category);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Deletes a competency that no evaluation has scored yet.
    pub async fn delete(&self, competency_id: Uuid) -> AppResult<()> {
        let db = self.store.writer()?;
        let competency = competency::Entity::find_by_id(competency_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Competency"))?;

        let scored = evaluation_score::Entity::find()
            .filter(evaluation_score::Column::CompetencyId.eq(competency_id))
            .count(db)
            .await?;
        if scored > 0 {
            return Err(AppError::Referential(format!(
                "Competency is used by {scored} evaluation scores"
            )));
        }

        let active: competency::ActiveModel = competency.into();
        active.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::timestamp;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn model(name: &str, category: CompetencyCategory) -> competency::Model {
        competency::Model {
            competency_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            category,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, sea_orm::Value> {
        BTreeMap::from([("num_items", sea_orm::Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn lists_by_category() {
        let leadership = model("Feedback", CompetencyCategory::Leadership);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![leadership.clone()]])
            .into_connection();
        let repo = CompetencyRepository::with_store(Store::from_connection(db));

        let found = repo
            .find_all(Some(CompetencyCategory::Leadership))
            .await
            .unwrap();
        assert_eq!(found, vec![leadership]);
    }

    #[tokio::test]
    async fn refuses_to_delete_a_scored_competency() {
        let used = model("Ownership", CompetencyCategory::CulturalCore);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![used.clone()]])
            .append_query_results([vec![count_row(3)]])
            .into_connection();
        let repo = CompetencyRepository::with_store(Store::from_connection(db));

        let err = repo.delete(used.competency_id).await.unwrap_err();
        assert!(matches!(err, AppError::Referential(_)));
    }

    #[tokio::test]
    async fn deletes_an_unscored_competency() {
        let unused = model("SQL", CompetencyCategory::HardSkillTechnical);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![unused.clone()]])
            .append_query_results([vec![count_row(0)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = CompetencyRepository::with_store(Store::from_connection(db));

        assert!(repo.delete(unused.competency_id).await.is_ok());
    }

    #[tokio::test]
    async fn missing_competency_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<competency::Model>::new()])
            .into_connection();
        let repo = CompetencyRepository::with_store(Store::from_connection(db));

        let err = repo
            .update(Uuid::new_v4(), CompetencyUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
