use std::collections::HashMap;

use async_trait::async_trait;

use super::{Employee, NewEmployee};
use crate::domain::{DomainResult, NewCredential};

#[async_trait]
pub trait EmployeeRepositoryInterface: Send + Sync {
    /// Inserts the employee and its credential as one unit: either both rows
    /// exist afterwards or neither does.
    async fn create_employee(
        &self,
        employee: NewEmployee,
        credential: NewCredential,
    ) -> DomainResult<Employee>;

    async fn get_employee_by_id(&self, id: i32) -> DomainResult<Option<Employee>>;
    async fn get_employee_by_email(&self, email: &str) -> DomainResult<Option<Employee>>;
    async fn email_exists(&self, email: &str) -> DomainResult<bool>;

    /// All employees ordered by name.
    async fn list_employees(&self) -> DomainResult<Vec<Employee>>;
    /// Employees holding `role_id`, ordered by name.
    async fn list_employees_by_role(&self, role_id: i32) -> DomainResult<Vec<Employee>>;
    async fn count_employees(&self) -> DomainResult<u64>;
    /// Active employees grouped by role id. Roles without active employees are absent.
    async fn count_active_by_role(&self) -> DomainResult<HashMap<i32, u64>>;

    /// Persists name, address, cell number, role and active flag.
    /// Returns `false` when no row matched.
    async fn update_employee(&self, employee: &Employee) -> DomainResult<bool>;
    /// Deletes the employee and its credential. Returns `false` when no row matched.
    async fn delete_employee(&self, id: i32) -> DomainResult<bool>;
}
