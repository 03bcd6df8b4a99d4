use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{Store, degrade};
use crate::entities::{employee, sea_orm_active_enums::UserRole, user};
use crate::errors::{AppError, AppResult};

pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<user::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(user::Entity::find_by_id(user_id).one(db).await)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(
            user::Entity::find()
                .filter(user::Column::Email.eq(email.trim().to_lowercase()))
                .one(db)
                .await,
        )
    }

    /// Employee record linked to the account, if any.
    pub async fn linked_employee(&self, user_id: Uuid) -> AppResult<Option<employee::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(
            employee::Entity::find()
                .filter(employee::Column::UserId.eq(user_id))
                .one(db)
                .await,
        )
    }

    pub async fn create(
        &self,
        email: &str,
        name: Option<String>,
        password_hash: String,
        role: UserRole,
    ) -> AppResult<user::Model> {
        let db = self.store.writer()?;
        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            user_id: Set(Uuid::new_v4()),
            email: Set(email.trim().to_lowercase()),
            name: Set(name),
            password: Set(password_hash),
            role: Set(role),
            last_signed_in: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(db).await?)
    }

    pub async fn touch_last_signed_in(&self, user_id: Uuid) -> AppResult<user::Model> {
        let db = self.store.writer()?;
        let user = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let now = Utc::now().naive_utc();
        let mut active: user::ActiveModel = user.into();
        active.last_signed_in = Set(Some(now));
        active.updated_at = Set(now);
        Ok(active.update(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::timestamp;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_model(email: &str) -> user::Model {
        user::Model {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            name: Some("Master".to_string()),
            password: "hash".to_string(),
            role: UserRole::Master,
            last_signed_in: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[tokio::test]
    async fn finds_user_by_normalised_email() {
        let expected = user_model("master@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![expected.clone()]])
            .into_connection();
        let repo = UserRepository::with_store(Store::from_connection(db));

        let found = repo.find_by_email("  Master@Example.com ").await.unwrap();
        assert_eq!(found, Some(expected));
    }

    #[tokio::test]
    async fn without_storage_lookups_are_empty_and_writes_fail() {
        let repo = UserRepository::with_store(Store::disconnected());

        assert_eq!(repo.find_by_email("a@example.com").await.unwrap(), None);
        assert!(matches!(
            repo.create("a@example.com", None, "hash".into(), UserRole::Employee)
                .await,
            Err(AppError::StorageUnavailable)
        ));
    }
}
