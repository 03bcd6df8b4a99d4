use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use super::{Store, degrade};
use crate::domain::LeadershipGraph;
use crate::entities::{employee, evaluation, position, sea_orm_active_enums::AccessLevel};
use crate::errors::{AppError, AppResult};

pub struct EmployeeRepository {
    store: Store,
}

pub struct NewEmployee {
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
    pub user_id: Option<Uuid>,
}

/// Outer `None` leaves a field untouched; `Some(None)` clears a nullable one.
#[derive(Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub badge: Option<String>,
    pub sector: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub position_id: Option<Uuid>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub admission_date: Option<NaiveDate>,
    pub leader_id: Option<Option<Uuid>>,
    pub access_level: Option<AccessLevel>,
    pub user_id: Option<Option<Uuid>>,
}

pub fn ensure_birth_before_admission(
    birth_date: Option<NaiveDate>,
    admission_date: NaiveDate,
) -> AppResult<()> {
    match birth_date {
        Some(birth_date) if birth_date >= admission_date => Err(AppError::validation(format!(
            "birth_date {birth_date} must precede admission_date {admission_date}"
        ))),
        _ => Ok(()),
    }
}

impl EmployeeRepository {
    pub fn new() -> Self {
        Self::with_store(Store::global())
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> AppResult<Vec<employee::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        degrade(
            employee::Entity::find()
                .order_by_asc(employee::Column::Name)
                .all(db)
                .await,
        )
    }

    pub async fn find_by_id(&self, employee_id: Uuid) -> AppResult<Option<employee::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(None);
        };
        degrade(employee::Entity::find_by_id(employee_id).one(db).await)
    }

    /// Direct reports of a leader.
    pub async fn subordinates(&self, leader_id: Uuid) -> AppResult<Vec<employee::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        degrade(
            employee::Entity::find()
                .filter(employee::Column::LeaderId.eq(leader_id))
                .order_by_asc(employee::Column::Name)
                .all(db)
                .await,
        )
    }

    /// Leaders above an employee, nearest first.
    pub async fn leadership_chain(&self, employee_id: Uuid) -> AppResult<Vec<employee::Model>> {
        let Some(db) = self.store.reader() else {
            return Ok(Vec::new());
        };
        let everyone = degrade(employee::Entity::find().all(db).await)?;
        let graph = LeadershipGraph::from_edges(everyone.iter().map(|e| (e.employee_id, e.leader_id)));

        let mut chain = Vec::new();
        for leader_id in graph.chain(employee_id) {
            if let Some(leader) = everyone.iter().find(|e| e.employee_id == leader_id) {
                chain.push(leader.clone());
            }
        }
        Ok(chain)
    }

    pub async fn create(&self, new: NewEmployee) -> AppResult<employee::Model> {
        let db = self.store.writer()?;
        ensure_position_exists(db, new.position_id).await?;
        ensure_unique(db, None, Some(&new.badge), Some(&new.cpf)).await?;

        let employee_id = Uuid::new_v4();
        if new.leader_id.is_some() {
            load_graph(db)
                .await?
                .validate_assignment(employee_id, new.leader_id)?;
        }

        let now = Utc::now().naive_utc();
        let model = employee::ActiveModel {
            employee_id: Set(employee_id),
            user_id: Set(new.user_id),
            name: Set(new.name),
            badge: Set(new.badge),
            sector: Set(new.sector),
            email: Set(new.email),
            cpf: Set(new.cpf),
            position_id: Set(new.position_id),
            birth_date: Set(new.birth_date),
            admission_date: Set(new.admission_date),
            leader_id: Set(new.leader_id),
            access_level: Set(new.access_level),
            last_access_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(db).await?;
        tracing::info!("Employee {} created", created.employee_id);
        Ok(created)
    }

    pub async fn update(
        &self,
        employee_id: Uuid,
        updates: EmployeeUpdate,
    ) -> AppResult<employee::Model> {
        let db = self.store.writer()?;
        let employee = employee::Entity::find_by_id(employee_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Employee"))?;

        ensure_birth_before_admission(
            updates.birth_date.unwrap_or(employee.birth_date),
            updates.admission_date.unwrap_or(employee.admission_date),
        )?;

        if let Some(position_id) = updates.position_id {
            ensure_position_exists(db, position_id).await?;
        }
        if updates.badge.is_some() || updates.cpf.is_some() {
            ensure_unique(
                db,
                Some(employee_id),
                updates.badge.as_deref(),
                updates.cpf.as_deref(),
            )
            .await?;
        }
        if let Some(leader_id) = updates.leader_id {
            load_graph(db)
                .await?
                .validate_assignment(employee_id, leader_id)?;
        }

        let mut active: employee::ActiveModel = employee.into();
        if let Some(name) = updates.name {
            active.name = Set(name);
        }
        if let Some(badge) = updates.badge {
            active.badge = Set(badge);
        }
        if let Some(sector) = updates.sector {
            active.sector = Set(sector);
        }
        if let Some(email) = updates.email {
            active.email = Set(email);
        }
        if let Some(cpf) = updates.cpf {
            active.cpf = Set(cpf);
        }
        if let Some(position_id) = updates.position_id {
            active.position_id = Set(position_id);
        }
        if let Some(birth_date) = updates.birth_date {
            active.birth_date = Set(birth_date);
        }
        if let Some(admission_date) = updates.admission_date {
            active.admission_date = Set(admission_date);
        }
        if let Some(leader_id) = updates.leader_id {
            active.leader_id = Set(leader_id);
        }
        if let Some(access_level) = updates.access_level {
            active.access_level = Set(access_level);
        }
        if let Some(user_id) = updates.user_id {
            active.user_id = Set(user_id);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    /// Deletes an employee. Their direct reports are left without a leader.
    ///
    /// Employees who conducted evaluations are kept until those are
    /// reassigned or deleted.
    pub async fn delete(&self, employee_id: Uuid) -> AppResult<u64> {
        let db = self.store.writer()?;
        let employee = employee::Entity::find_by_id(employee_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Employee"))?;

        let conducted = evaluation::Entity::find()
            .filter(evaluation::Column::EvaluatorId.eq(employee_id))
            .count(db)
            .await?;
        if conducted > 0 {
            return Err(AppError::Referential(format!(
                "Employee is the evaluator of {conducted} evaluations"
            )));
        }

        let txn = db.begin().await?;
        let detached = employee::Entity::update_many()
            .col_expr(employee::Column::LeaderId, Expr::value(Option::<Uuid>::None))
            .col_expr(
                employee::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(employee::Column::LeaderId.eq(employee_id))
            .exec(&txn)
            .await?
            .rows_affected;
        employee::Entity::delete_by_id(employee.employee_id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        if detached > 0 {
            tracing::info!(
                "Employee {} deleted, {} direct reports detached",
                employee_id,
                detached
            );
        }
        Ok(detached)
    }

    pub async fn touch_last_access(&self, employee_id: Uuid) -> AppResult<()> {
        let db = self.store.writer()?;
        let now = Utc::now().naive_utc();
        employee::Entity::update_many()
            .col_expr(employee::Column::LastAccessAt, Expr::value(Some(now)))
            .filter(employee::Column::EmployeeId.eq(employee_id))
            .exec(db)
            .await?;
        Ok(())
    }
}

async fn load_graph<C: ConnectionTrait>(db: &C) -> AppResult<LeadershipGraph> {
    let edges = employee::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|e| (e.employee_id, e.leader_id));
    Ok(LeadershipGraph::from_edges(edges))
}

async fn ensure_position_exists<C: ConnectionTrait>(db: &C, position_id: Uuid) -> AppResult<()> {
    position::Entity::find_by_id(position_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("Position {position_id}")))
}

async fn ensure_unique<C: ConnectionTrait>(
    db: &C,
    exclude: Option<Uuid>,
    badge: Option<&str>,
    cpf: Option<&str>,
) -> AppResult<()> {
    let mut any = Condition::any();
    if let Some(badge) = badge {
        any = any.add(employee::Column::Badge.eq(badge));
    }
    if let Some(cpf) = cpf {
        any = any.add(employee::Column::Cpf.eq(cpf));
    }

    let mut query = employee::Entity::find().filter(any);
    if let Some(id) = exclude {
        query = query.filter(employee::Column::EmployeeId.ne(id));
    }

    match query.one(db).await? {
        Some(existing) if badge == Some(existing.badge.as_str()) => Err(AppError::Referential(
            format!("Badge {} is already in use", existing.badge),
        )),
        Some(_) => Err(AppError::Referential(
            "CPF is already registered to another employee".to_string(),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{date, timestamp};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    fn employee(name: &str, leader_id: Option<Uuid>) -> employee::Model {
        employee::Model {
            employee_id: Uuid::new_v4(),
            user_id: None,
            name: name.to_string(),
            badge: format!("B-{name}"),
            sector: "Operations".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            cpf: format!("000.000.000-{:02}", name.len()),
            position_id: Uuid::new_v4(),
            birth_date: None,
            admission_date: date(2020, 2, 1),
            leader_id,
            access_level: AccessLevel::Pleno,
            last_access_at: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[tokio::test]
    async fn reversing_a_leadership_edge_is_rejected() {
        let a = employee("Ana", None);
        let b = employee("Bruno", Some(a.employee_id));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![a.clone()]])
            .append_query_results([vec![a.clone(), b.clone()]])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        let err = repo
            .update(
                a.employee_id,
                EmployeeUpdate {
                    leader_id: Some(Some(b.employee_id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Referential(_)));
    }

    #[tokio::test]
    async fn self_leadership_is_rejected() {
        let a = employee("Ana", None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![a.clone()]])
            .append_query_results([vec![a.clone()]])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        let err = repo
            .update(
                a.employee_id,
                EmployeeUpdate {
                    leader_id: Some(Some(a.employee_id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Referential(_)));
    }

    #[tokio::test]
    async fn taken_badge_is_a_conflict() {
        let existing = employee("Carla", None);
        let position = position::Model {
            position_id: existing.position_id,
            title: "Analyst".to_string(),
            description: None,
            requirements: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![position]])
            .append_query_results([vec![existing.clone()]])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        let err = repo
            .create(NewEmployee {
                name: "Daniel".into(),
                badge: existing.badge.clone(),
                sector: "Finance".into(),
                email: "daniel@example.com".into(),
                cpf: "111.111.111-11".into(),
                position_id: existing.position_id,
                birth_date: None,
                admission_date: date(2024, 1, 8),
                leader_id: None,
                access_level: AccessLevel::Pleno,
                user_id: None,
            })
            .await
            .unwrap_err();
        match err {
            AppError::Referential(message) => assert!(message.contains("Badge")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_position_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<position::Model>::new()])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        let err = repo
            .create(NewEmployee {
                name: "Eva".into(),
                badge: "B-1".into(),
                sector: "HR".into(),
                email: "eva@example.com".into(),
                cpf: "222.222.222-22".into(),
                position_id: Uuid::new_v4(),
                birth_date: None,
                admission_date: date(2024, 1, 8),
                leader_id: None,
                access_level: AccessLevel::Premium,
                user_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_a_leader_detaches_reports() {
        let lead = employee("Lead", None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lead.clone()]])
            .append_query_results([vec![count_row(0)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        assert_eq!(repo.delete(lead.employee_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn evaluators_cannot_be_deleted() {
        let evaluator = employee("Helena", None);
        // no exec results: reaching the transaction would fail the test
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![evaluator.clone()]])
            .append_query_results([vec![count_row(3)]])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        match repo.delete(evaluator.employee_id).await.unwrap_err() {
            AppError::Referential(message) => {
                assert_eq!(message, "Employee is the evaluator of 3 evaluations")
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn patched_dates_are_checked_against_the_stored_row() {
        let stored = employee::Model {
            birth_date: Some(date(1990, 5, 10)),
            ..employee("Igor", None)
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()], vec![stored.clone()]])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        let late_birth = repo
            .update(
                stored.employee_id,
                EmployeeUpdate {
                    birth_date: Some(Some(date(2021, 1, 1))),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(late_birth, AppError::Validation(_)));

        let early_admission = repo
            .update(
                stored.employee_id,
                EmployeeUpdate {
                    admission_date: Some(date(1989, 12, 31)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(early_admission, AppError::Validation(_)));
    }

    #[test]
    fn birth_must_precede_admission() {
        assert!(ensure_birth_before_admission(None, date(2020, 1, 1)).is_ok());
        assert!(ensure_birth_before_admission(Some(date(1995, 3, 2)), date(2020, 1, 1)).is_ok());
        assert!(ensure_birth_before_admission(Some(date(2020, 1, 1)), date(2020, 1, 1)).is_err());
    }

    #[tokio::test]
    async fn chain_walks_up_to_the_root() {
        let ceo = employee("Ceo", None);
        let manager = employee("Manager", Some(ceo.employee_id));
        let analyst = employee("Analyst", Some(manager.employee_id));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ceo.clone(), manager.clone(), analyst.clone()]])
            .into_connection();
        let repo = EmployeeRepository::with_store(Store::from_connection(db));

        let chain = repo.leadership_chain(analyst.employee_id).await.unwrap();
        assert_eq!(chain, vec![manager, ceo]);
    }
}
