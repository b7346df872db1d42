use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeErrorCode, EmployeeRepositoryInterface,
    NewCredential, NewEmployee,
};
use crate::infrastructure::database::entities::{employee, role, user_password};

use super::db_err;

pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn employee_model_to_domain(model: employee::Model, role: Option<role::Model>) -> Employee {
    Employee {
        id: model.id,
        email: model.email,
        name: model.name,
        address: model.address,
        cell_number: model.cell_number,
        role_id: model.role_id,
        role_name: role.map(|r| r.role_name),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn insert_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::new(EmployeeErrorCode::UserAlreadyExists)
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => DomainError::with_details(
            EmployeeErrorCode::InvalidEmployeeData,
            "Invalid role specified",
        ),
        _ => db_err(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl EmployeeRepositoryInterface for EmployeeRepository {
    async fn create_employee(
        &self,
        new_employee: NewEmployee,
        credential: NewCredential,
    ) -> DomainResult<Employee> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        let inserted = employee::ActiveModel {
            id: NotSet,
            email: Set(new_employee.email),
            name: Set(new_employee.name),
            address: Set(new_employee.address),
            cell_number: Set(new_employee.cell_number),
            role_id: Set(new_employee.role_id),
            is_active: Set(new_employee.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(insert_err)?;

        user_password::ActiveModel {
            user_id: Set(inserted.id),
            password_hash: Set(credential.password_hash),
            salt: Set(credential.salt),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        // Dropping an uncommitted transaction rolls it back
        txn.commit().await.map_err(db_err)?;
        debug!(employee_id = inserted.id, "Employee row and credential committed");

        self.get_employee_by_id(inserted.id)
            .await?
            .ok_or_else(|| DomainError::internal("created employee could not be reloaded"))
    }

    async fn get_employee_by_id(&self, id: i32) -> DomainResult<Option<Employee>> {
        let row = employee::Entity::find_by_id(id)
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(e, r)| employee_model_to_domain(e, r)))
    }

    async fn get_employee_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        let row = employee::Entity::find()
            .filter(employee::Column::Email.eq(email))
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(e, r)| employee_model_to_domain(e, r)))
    }

    async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        let count = employee::Entity::find()
            .filter(employee::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }

    async fn list_employees(&self) -> DomainResult<Vec<Employee>> {
        let rows = employee::Entity::find()
            .find_also_related(role::Entity)
            .order_by_asc(employee::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(e, r)| employee_model_to_domain(e, r))
            .collect())
    }

    async fn list_employees_by_role(&self, role_id: i32) -> DomainResult<Vec<Employee>> {
        let rows = employee::Entity::find()
            .filter(employee::Column::RoleId.eq(role_id))
            .find_also_related(role::Entity)
            .order_by_asc(employee::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(e, r)| employee_model_to_domain(e, r))
            .collect())
    }

    async fn count_employees(&self) -> DomainResult<u64> {
        employee::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_active_by_role(&self) -> DomainResult<HashMap<i32, u64>> {
        let rows: Vec<(i32, i64)> = employee::Entity::find()
            .select_only()
            .column(employee::Column::RoleId)
            .column_as(Expr::col(employee::Column::Id).count(), "employee_count")
            .filter(employee::Column::IsActive.eq(true))
            .group_by(employee::Column::RoleId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(role_id, count)| (role_id, count.max(0) as u64))
            .collect())
    }

    async fn update_employee(&self, updated: &Employee) -> DomainResult<bool> {
        let result = employee::Entity::update_many()
            .col_expr(employee::Column::Name, Expr::value(updated.name.clone()))
            .col_expr(employee::Column::Address, Expr::value(updated.address.clone()))
            .col_expr(
                employee::Column::CellNumber,
                Expr::value(updated.cell_number.clone()),
            )
            .col_expr(employee::Column::RoleId, Expr::value(updated.role_id))
            .col_expr(employee::Column::IsActive, Expr::value(updated.is_active))
            .col_expr(employee::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(employee::Column::Id.eq(updated.id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_employee(&self, id: i32) -> DomainResult<bool> {
        let txn = self.db.begin().await.map_err(db_err)?;

        user_password::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = employee::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CredentialRepositoryInterface, RoleName};
    use crate::infrastructure::database::repositories::CredentialRepository;
    use crate::infrastructure::database::test_connection;

    fn new_employee(email: &str, name: &str, role: RoleName) -> NewEmployee {
        NewEmployee {
            email: email.to_string(),
            name: name.to_string(),
            address: None,
            cell_number: Some("+1 555 0100".to_string()),
            role_id: role.seed_id(),
            is_active: true,
        }
    }

    fn credential() -> NewCredential {
        NewCredential {
            password_hash: "5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8"
                .to_string(),
            salt: None,
        }
    }

    #[tokio::test]
    async fn create_stores_employee_and_credential() {
        let db = test_connection().await;
        let repo = EmployeeRepository::new(db.clone());

        let created = repo
            .create_employee(new_employee("ann@example.com", "Ann", RoleName::Hr), credential())
            .await
            .unwrap();

        assert_eq!(created.role_name.as_deref(), Some("HR"));
        assert!(repo.email_exists("ann@example.com").await.unwrap());

        let stored = CredentialRepository::new(db)
            .get_credential(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.salt, None);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_partial_writes() {
        let db = test_connection().await;
        let repo = EmployeeRepository::new(db);

        repo.create_employee(new_employee("bob@example.com", "Bob", RoleName::Employee), credential())
            .await
            .unwrap();
        let err = repo
            .create_employee(new_employee("bob@example.com", "Bobby", RoleName::Employee), credential())
            .await
            .unwrap_err();

        assert!(err.is(EmployeeErrorCode::UserAlreadyExists));
        assert_eq!(repo.count_employees().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn email_column_ignores_case() {
        let db = test_connection().await;
        let repo = EmployeeRepository::new(db);

        let created = repo
            .create_employee(new_employee("Case@Example.com", "Casey", RoleName::Employee), credential())
            .await
            .unwrap();
        let err = repo
            .create_employee(new_employee("case@example.com", "Casey", RoleName::Employee), credential())
            .await
            .unwrap_err();
        assert!(err.is(EmployeeErrorCode::UserAlreadyExists));

        assert!(repo.email_exists("CASE@example.COM").await.unwrap());
        let found = repo.get_employee_by_email("case@EXAMPLE.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "Case@Example.com");
    }

    #[tokio::test]
    async fn lists_are_ordered_by_name_and_counts_skip_inactive() {
        let db = test_connection().await;
        let repo = EmployeeRepository::new(db);

        for (email, name) in [("z@example.com", "Zed"), ("a@example.com", "Amy")] {
            repo.create_employee(new_employee(email, name, RoleName::Employee), credential())
                .await
                .unwrap();
        }
        let mut inactive = new_employee("i@example.com", "Ian", RoleName::Employee);
        inactive.is_active = false;
        repo.create_employee(inactive, credential()).await.unwrap();

        let names: Vec<_> = repo
            .list_employees_by_role(RoleName::Employee.seed_id())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Amy", "Ian", "Zed"]);

        let counts = repo.count_active_by_role().await.unwrap();
        assert_eq!(counts.get(&RoleName::Employee.seed_id()), Some(&2));
        assert_eq!(counts.get(&RoleName::Hr.seed_id()), None);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let db = test_connection().await;
        let repo = EmployeeRepository::new(db.clone());

        let mut employee = repo
            .create_employee(new_employee("c@example.com", "Cat", RoleName::Employee), credential())
            .await
            .unwrap();
        employee.name = "Catherine".to_string();
        assert!(repo.update_employee(&employee).await.unwrap());

        let reloaded = repo.get_employee_by_id(employee.id).await.unwrap().unwrap();
        assert_eq!(reloaded.name, "Catherine");

        assert!(repo.delete_employee(employee.id).await.unwrap());
        assert!(!repo.delete_employee(employee.id).await.unwrap());
        assert!(!repo.update_employee(&employee).await.unwrap());
        assert!(CredentialRepository::new(db)
            .get_credential(employee.id)
            .await
            .unwrap()
            .is_none());
    }
}
