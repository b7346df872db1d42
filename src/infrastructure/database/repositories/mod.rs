//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod credential_repository;
pub mod employee_repository;
pub mod repository_provider;
pub mod role_repository;

pub use credential_repository::CredentialRepository;
pub use employee_repository::EmployeeRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use role_repository::RoleRepository;

use crate::domain::DomainError;

/// Driver errors never leave the repository raw.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::internal(e.to_string())
}
