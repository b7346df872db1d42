//! Directory service: application-layer orchestration for employee records
//!
//! Every operation authorizes the caller first, then checks existence.
//! HTTP handlers stay thin and delegate here.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::reports::{DirectorySummary, RoleCount, RoleGroup};
use crate::domain::{
    authorize, Caller, CommonErrorCode, CreateEmployeeDto, DomainError, DomainResult, Employee,
    EmployeeErrorCode, NewCredential, NewEmployee, Policy, RepositoryProvider, UpdateEmployeeDto,
};
use crate::infrastructure::crypto::password::hash_password;

pub struct DirectoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DirectoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_by_id(&self, id: i32, caller: &Caller) -> DomainResult<Employee> {
        authorize(Policy::SameUserOrHr, caller, Some(id))?;

        self.repos
            .employees()
            .get_employee_by_id(id)
            .await?
            .ok_or_else(|| {
                warn!(employee_id = id, "Employee not found");
                DomainError::not_found()
            })
    }

    /// All employees ordered by name.
    pub async fn get_all(&self, caller: &Caller) -> DomainResult<Vec<Employee>> {
        authorize(Policy::HrOnly, caller, None)?;
        self.repos.employees().list_employees().await
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create(&self, dto: CreateEmployeeDto, caller: &Caller) -> DomainResult<Employee> {
        authorize(Policy::HrOnly, caller, None)?;
        self.insert(dto).await
    }

    /// Creates the first HR account when the directory is empty.
    /// Returns `None` when employees already exist.
    pub async fn seed_initial_hr(&self, dto: CreateEmployeeDto) -> DomainResult<Option<Employee>> {
        if self.repos.employees().count_employees().await? > 0 {
            return Ok(None);
        }
        self.insert(dto).await.map(Some)
    }

    async fn insert(&self, mut dto: CreateEmployeeDto) -> DomainResult<Employee> {
        let employees = self.repos.employees();
        dto.email = dto.email.trim().to_string();
        dto.name = dto.name.trim().to_string();

        if employees.email_exists(&dto.email).await? {
            warn!(email = %dto.email, "Attempt to create employee with existing email");
            return Err(EmployeeErrorCode::UserAlreadyExists.into());
        }
        self.ensure_role_exists(dto.role_id).await?;

        let password_hash = hash_password(&dto.password).map_err(|e| {
            DomainError::with_details(EmployeeErrorCode::InvalidEmployeeData, e.to_string())
        })?;

        let created = employees
            .create_employee(
                NewEmployee {
                    email: dto.email,
                    name: dto.name,
                    address: dto.address,
                    cell_number: dto.cell_number,
                    role_id: dto.role_id,
                    is_active: true,
                },
                NewCredential {
                    password_hash,
                    salt: None,
                },
            )
            .await?;

        info!(employee_id = created.id, email = %created.email, "Employee created");
        Ok(created)
    }

    /// Partial update. Role and active flag changes from non-HR callers are dropped.
    pub async fn update(
        &self,
        id: i32,
        dto: UpdateEmployeeDto,
        caller: &Caller,
    ) -> DomainResult<Employee> {
        authorize(Policy::SameUserOrHr, caller, Some(id))?;

        let employees = self.repos.employees();
        let Some(mut employee) = employees.get_employee_by_id(id).await? else {
            warn!(employee_id = id, "Update failed: employee not found");
            return Err(DomainError::not_found());
        };

        if let Some(name) = dto.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            employee.name = name.to_string();
        }
        if let Some(address) = dto.address {
            employee.address = Some(address);
        }
        if let Some(cell_number) = dto.cell_number {
            employee.cell_number = Some(cell_number);
        }

        if caller.is_hr() {
            if let Some(role_id) = dto.role_id {
                self.ensure_role_exists(role_id).await?;
                employee.role_id = role_id;
            }
            if let Some(is_active) = dto.is_active {
                employee.is_active = is_active;
            }
        }

        if !employees.update_employee(&employee).await? {
            error!(employee_id = id, "Employee row vanished during update");
            return Err(CommonErrorCode::DatabaseError.into());
        }
        info!(employee_id = id, "Employee updated");

        employees
            .get_employee_by_id(id)
            .await?
            .ok_or_else(DomainError::not_found)
    }

    pub async fn delete(&self, id: i32, caller: &Caller) -> DomainResult<()> {
        authorize(Policy::HrOnly, caller, None)?;

        let employees = self.repos.employees();
        if employees.get_employee_by_id(id).await?.is_none() {
            warn!(employee_id = id, "Delete failed: employee not found");
            return Err(DomainError::not_found());
        }

        if !employees.delete_employee(id).await? {
            error!(employee_id = id, "Employee row vanished during delete");
            return Err(CommonErrorCode::DatabaseError.into());
        }
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    // ── Reports ─────────────────────────────────────────────────

    /// Every role with its active employee count, roles ordered by name.
    pub async fn role_counts(&self, caller: &Caller) -> DomainResult<Vec<RoleCount>> {
        authorize(Policy::HrOnly, caller, None)?;

        let roles = self.repos.roles().list_roles().await?;
        let counts = self.repos.employees().count_active_by_role().await?;

        Ok(roles
            .into_iter()
            .map(|role| RoleCount {
                employee_count: counts.get(&role.id).copied().unwrap_or(0),
                role_id: role.id,
                role_name: role.name,
            })
            .collect())
    }

    /// Every role with all of its employees, active or not.
    pub async fn employees_by_role(&self, caller: &Caller) -> DomainResult<Vec<RoleGroup>> {
        authorize(Policy::HrOnly, caller, None)?;

        let roles = self.repos.roles().list_roles().await?;
        let mut groups = Vec::with_capacity(roles.len());
        for role in roles {
            let employees = self.repos.employees().list_employees_by_role(role.id).await?;
            groups.push(RoleGroup {
                role_id: role.id,
                role_name: role.name,
                employees,
            });
        }
        Ok(groups)
    }

    pub async fn summary(&self, caller: &Caller) -> DomainResult<DirectorySummary> {
        let counts = self.role_counts(caller).await?;
        Ok(DirectorySummary::from_counts(counts))
    }

    async fn ensure_role_exists(&self, role_id: i32) -> DomainResult<()> {
        if self.repos.roles().get_role_by_id(role_id).await?.is_none() {
            warn!(role_id, "Unknown role requested");
            return Err(DomainError::with_details(
                EmployeeErrorCode::InvalidEmployeeData,
                "Invalid role specified",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthErrorCode, RoleName};
    use crate::infrastructure::storage::InMemoryStorage;

    fn service() -> (DirectoryService, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::new());
        (DirectoryService::new(storage.clone()), storage)
    }

    fn hr() -> Caller {
        Caller::new(1000, "hr@example.com", RoleName::Hr)
    }

    fn as_employee(employee: &Employee) -> Caller {
        Caller::new(employee.id, employee.email.clone(), RoleName::Employee)
    }

    fn dto(email: &str, name: &str, role: RoleName) -> CreateEmployeeDto {
        CreateEmployeeDto {
            email: email.to_string(),
            name: name.to_string(),
            address: None,
            cell_number: None,
            role_id: role.seed_id(),
            password: "Secret123".to_string(),
        }
    }

    async fn add(service: &DirectoryService, email: &str, name: &str) -> Employee {
        service
            .create(dto(email, name, RoleName::Employee), &hr())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn owner_and_hr_can_read_others_cannot() {
        let (service, _) = service();
        let alice = add(&service, "alice@example.com", "Alice").await;
        let bob = add(&service, "bob@example.com", "Bob").await;

        assert_eq!(
            service.get_by_id(alice.id, &as_employee(&alice)).await.unwrap().id,
            alice.id
        );
        let err = service.get_by_id(alice.id, &as_employee(&bob)).await.unwrap_err();
        assert!(err.is(AuthErrorCode::InsufficientPermissions));

        let hr_other = Caller::new(bob.id, "bob@example.com", RoleName::Hr);
        assert!(service.get_by_id(alice.id, &hr_other).await.is_ok());
    }

    #[tokio::test]
    async fn authorization_is_checked_before_existence() {
        let (service, _) = service();
        let alice = add(&service, "alice@example.com", "Alice").await;

        let err = service.get_by_id(9999, &as_employee(&alice)).await.unwrap_err();
        assert!(err.is(AuthErrorCode::InsufficientPermissions));

        let err = service.get_by_id(9999, &hr()).await.unwrap_err();
        assert!(err.is(EmployeeErrorCode::UserNotFound));
    }

    #[tokio::test]
    async fn create_with_existing_email_writes_nothing() {
        let (service, storage) = service();
        add(&service, "dup@example.com", "First").await;

        let err = service
            .create(dto("dup@example.com", "Second", RoleName::Hr), &hr())
            .await
            .unwrap_err();

        assert!(err.is(EmployeeErrorCode::UserAlreadyExists));
        assert_eq!(storage.employees().count_employees().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_rejects_unknown_role_and_non_hr_callers() {
        let (service, _) = service();
        let mut bad_role = dto("x@example.com", "Xavier", RoleName::Employee);
        bad_role.role_id = 42;

        let err = service.create(bad_role, &hr()).await.unwrap_err();
        assert!(err.is(EmployeeErrorCode::InvalidEmployeeData));
        assert_eq!(err.details.as_deref(), Some("Invalid role specified"));

        let alice = add(&service, "alice@example.com", "Alice").await;
        let err = service
            .create(dto("y@example.com", "Yan", RoleName::Employee), &as_employee(&alice))
            .await
            .unwrap_err();
        assert!(err.is(AuthErrorCode::InsufficientPermissions));
    }

    #[tokio::test]
    async fn created_employee_has_hashed_credential() {
        let (service, storage) = service();
        let alice = add(&service, "alice@example.com", "Alice").await;

        let credential = storage
            .credentials()
            .get_credential(alice.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credential.password_hash, hash_password("Secret123").unwrap());
        assert!(alice.is_active);
        assert_eq!(alice.role_name.as_deref(), Some("Employee"));
    }

    #[tokio::test]
    async fn non_hr_update_ignores_role_and_active_flag() {
        let (service, _) = service();
        let alice = add(&service, "alice@example.com", "Alice").await;

        let updated = service
            .update(
                alice.id,
                UpdateEmployeeDto {
                    name: Some("Alice Smith".to_string()),
                    address: Some("1 Main St".to_string()),
                    role_id: Some(RoleName::Hr.seed_id()),
                    is_active: Some(false),
                    ..Default::default()
                },
                &as_employee(&alice),
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Alice Smith");
        assert_eq!(updated.address.as_deref(), Some("1 Main St"));
        assert_eq!(updated.role_id, RoleName::Employee.seed_id());
        assert!(updated.is_active);
    }

    #[tokio::test]
    async fn hr_update_applies_role_and_skips_blank_name() {
        let (service, _) = service();
        let alice = add(&service, "alice@example.com", "Alice").await;

        let updated = service
            .update(
                alice.id,
                UpdateEmployeeDto {
                    name: Some("   ".to_string()),
                    role_id: Some(RoleName::Hr.seed_id()),
                    is_active: Some(false),
                    ..Default::default()
                },
                &hr(),
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.role_name.as_deref(), Some("HR"));
        assert!(!updated.is_active);

        let err = service
            .update(
                alice.id,
                UpdateEmployeeDto {
                    role_id: Some(77),
                    ..Default::default()
                },
                &hr(),
            )
            .await
            .unwrap_err();
        assert!(err.is(EmployeeErrorCode::InvalidEmployeeData));
    }

    #[tokio::test]
    async fn names_are_stored_trimmed() {
        let (service, _) = service();
        let alice = add(&service, "alice@example.com", "  Alice  ").await;
        assert_eq!(alice.name, "Alice");

        let updated = service
            .update(
                alice.id,
                UpdateEmployeeDto {
                    name: Some("  Alice Smith ".to_string()),
                    ..Default::default()
                },
                &as_employee(&alice),
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Alice Smith");
    }

    #[tokio::test]
    async fn create_rejects_email_differing_only_by_case() {
        let (service, storage) = service();
        add(&service, "Case@Example.com", "Casey").await;

        let err = service
            .create(dto("case@example.com", "Other Casey", RoleName::Employee), &hr())
            .await
            .unwrap_err();
        assert!(err.is(EmployeeErrorCode::UserAlreadyExists));
        assert_eq!(storage.employees().count_employees().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_is_hr_only_and_reports_missing_ids() {
        let (service, _) = service();
        let alice = add(&service, "alice@example.com", "Alice").await;

        let err = service.delete(alice.id, &as_employee(&alice)).await.unwrap_err();
        assert!(err.is(AuthErrorCode::InsufficientPermissions));

        service.delete(alice.id, &hr()).await.unwrap();
        let err = service.delete(alice.id, &hr()).await.unwrap_err();
        assert!(err.is(EmployeeErrorCode::UserNotFound));
    }

    #[tokio::test]
    async fn role_counts_include_empty_roles_and_skip_inactive() {
        let (service, _) = service();
        let alice = add(&service, "alice@example.com", "Alice").await;
        add(&service, "bob@example.com", "Bob").await;
        service
            .update(
                alice.id,
                UpdateEmployeeDto {
                    is_active: Some(false),
                    ..Default::default()
                },
                &hr(),
            )
            .await
            .unwrap();

        let counts = service.role_counts(&hr()).await.unwrap();
        let pairs: Vec<_> = counts
            .iter()
            .map(|c| (c.role_name.as_str(), c.employee_count))
            .collect();
        assert_eq!(pairs, [("Employee", 1), ("HR", 0)]);

        let summary = service.summary(&hr()).await.unwrap();
        assert_eq!(summary.total_employees, 1);

        let groups = service.employees_by_role(&hr()).await.unwrap();
        let names: Vec<_> = groups[0].employees.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
        assert!(groups[1].employees.is_empty());
    }

    #[tokio::test]
    async fn seed_runs_only_on_empty_directory() {
        let (service, _) = service();
        let seeded = service
            .seed_initial_hr(dto("admin@example.com", "Admin", RoleName::Hr))
            .await
            .unwrap();
        assert!(seeded.is_some());

        let again = service
            .seed_initial_hr(dto("other@example.com", "Other", RoleName::Hr))
            .await
            .unwrap();
        assert!(again.is_none());
    }
}
