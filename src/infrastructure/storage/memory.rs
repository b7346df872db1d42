//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Credential, CredentialRepositoryInterface, DomainError, DomainResult, Employee,
    EmployeeErrorCode, EmployeeRepositoryInterface, NewCredential, NewEmployee,
    RepositoryProvider, Role, RoleName, RoleRepositoryInterface,
};

/// In-memory storage for development and testing.
///
/// Seeded with the same two roles as the database migration.
pub struct InMemoryStorage {
    roles: DashMap<i32, Role>,
    employees: DashMap<i32, Employee>,
    credentials: DashMap<i32, Credential>,
    /// lower-cased email -> employee id; the entry lock makes the uniqueness
    /// check atomic
    emails: DashMap<String, i32>,
    employee_counter: AtomicI32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        let storage = Self {
            roles: DashMap::new(),
            employees: DashMap::new(),
            credentials: DashMap::new(),
            emails: DashMap::new(),
            employee_counter: AtomicI32::new(1),
        };

        let now = Utc::now();
        for role in RoleName::ALL {
            storage.roles.insert(
                role.seed_id(),
                Role {
                    id: role.seed_id(),
                    name: role.as_str().to_string(),
                    description: None,
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        storage
    }

    fn with_role_name(&self, mut employee: Employee) -> Employee {
        employee.role_name = self.roles.get(&employee.role_id).map(|r| r.name.clone());
        employee
    }

    fn sorted_by_name(&self, mut employees: Vec<Employee>) -> Vec<Employee> {
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        employees
            .into_iter()
            .map(|e| self.with_role_name(e))
            .collect()
    }
}

/// Emails compare ASCII case-insensitively, like the `NOCASE` column.
fn email_key(email: &str) -> String {
    email.to_ascii_lowercase()
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn employees(&self) -> &dyn EmployeeRepositoryInterface {
        self
    }

    fn roles(&self) -> &dyn RoleRepositoryInterface {
        self
    }

    fn credentials(&self) -> &dyn CredentialRepositoryInterface {
        self
    }
}

#[async_trait]
impl EmployeeRepositoryInterface for InMemoryStorage {
    async fn create_employee(
        &self,
        employee: NewEmployee,
        credential: NewCredential,
    ) -> DomainResult<Employee> {
        if !self.roles.contains_key(&employee.role_id) {
            return Err(DomainError::with_details(
                EmployeeErrorCode::InvalidEmployeeData,
                "Invalid role specified",
            ));
        }

        let id = match self.emails.entry(email_key(&employee.email)) {
            Entry::Occupied(_) => return Err(EmployeeErrorCode::UserAlreadyExists.into()),
            Entry::Vacant(slot) => {
                let id = self.employee_counter.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                id
            }
        };

        let now = Utc::now();
        let stored = Employee {
            id,
            email: employee.email,
            name: employee.name,
            address: employee.address,
            cell_number: employee.cell_number,
            role_id: employee.role_id,
            role_name: None,
            is_active: employee.is_active,
            created_at: now,
            updated_at: now,
        };
        self.credentials.insert(
            id,
            Credential {
                user_id: id,
                password_hash: credential.password_hash,
                salt: credential.salt,
                created_at: now,
                updated_at: now,
            },
        );
        self.employees.insert(id, stored.clone());

        Ok(self.with_role_name(stored))
    }

    async fn get_employee_by_id(&self, id: i32) -> DomainResult<Option<Employee>> {
        Ok(self
            .employees
            .get(&id)
            .map(|e| self.with_role_name(e.clone())))
    }

    async fn get_employee_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        let Some(id) = self.emails.get(&email_key(email)).map(|id| *id) else {
            return Ok(None);
        };
        self.get_employee_by_id(id).await
    }

    async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        Ok(self.emails.contains_key(&email_key(email)))
    }

    async fn list_employees(&self) -> DomainResult<Vec<Employee>> {
        let all = self.employees.iter().map(|e| e.value().clone()).collect();
        Ok(self.sorted_by_name(all))
    }

    async fn list_employees_by_role(&self, role_id: i32) -> DomainResult<Vec<Employee>> {
        let matching = self
            .employees
            .iter()
            .filter(|e| e.role_id == role_id)
            .map(|e| e.value().clone())
            .collect();
        Ok(self.sorted_by_name(matching))
    }

    async fn count_employees(&self) -> DomainResult<u64> {
        Ok(self.employees.len() as u64)
    }

    async fn count_active_by_role(&self) -> DomainResult<HashMap<i32, u64>> {
        let mut counts = HashMap::new();
        for employee in self.employees.iter().filter(|e| e.is_active) {
            *counts.entry(employee.role_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn update_employee(&self, employee: &Employee) -> DomainResult<bool> {
        if !self.roles.contains_key(&employee.role_id) {
            return Err(DomainError::with_details(
                EmployeeErrorCode::InvalidEmployeeData,
                "Invalid role specified",
            ));
        }

        let Some(mut stored) = self.employees.get_mut(&employee.id) else {
            return Ok(false);
        };
        stored.name = employee.name.clone();
        stored.address = employee.address.clone();
        stored.cell_number = employee.cell_number.clone();
        stored.role_id = employee.role_id;
        stored.is_active = employee.is_active;
        stored.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_employee(&self, id: i32) -> DomainResult<bool> {
        self.credentials.remove(&id);
        match self.employees.remove(&id) {
            Some((_, removed)) => {
                self.emails.remove(&email_key(&removed.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RoleRepositoryInterface for InMemoryStorage {
    async fn get_role_by_id(&self, id: i32) -> DomainResult<Option<Role>> {
        Ok(self.roles.get(&id).map(|r| r.clone()))
    }

    async fn get_role_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        Ok(self
            .roles
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value().clone()))
    }

    async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let mut roles: Vec<Role> = self.roles.iter().map(|r| r.value().clone()).collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}

#[async_trait]
impl CredentialRepositoryInterface for InMemoryStorage {
    async fn get_credential(&self, user_id: i32) -> DomainResult<Option<Credential>> {
        Ok(self.credentials.get(&user_id).map(|c| c.clone()))
    }

    async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> DomainResult<bool> {
        let Some(mut credential) = self.credentials.get_mut(&user_id) else {
            return Ok(false);
        };
        credential.password_hash = password_hash.to_string();
        credential.updated_at = Utc::now();
        Ok(true)
    }
}
