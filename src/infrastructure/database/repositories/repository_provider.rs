//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{
    CredentialRepositoryInterface, EmployeeRepositoryInterface, RoleRepositoryInterface,
};

use super::credential_repository::CredentialRepository;
use super::employee_repository::EmployeeRepository;
use super::role_repository::RoleRepository;

/// Repository provider backed by one SeaORM connection pool.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let employee = repos.employees().get_employee_by_id(5).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    employees: EmployeeRepository,
    roles: RoleRepository,
    credentials: CredentialRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            employees: EmployeeRepository::new(db.clone()),
            roles: RoleRepository::new(db.clone()),
            credentials: CredentialRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn employees(&self) -> &dyn EmployeeRepositoryInterface {
        &self.employees
    }

    fn roles(&self) -> &dyn RoleRepositoryInterface {
        &self.roles
    }

    fn credentials(&self) -> &dyn CredentialRepositoryInterface {
        &self.credentials
    }
}
