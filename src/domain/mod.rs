pub mod authorization;
pub mod credential;
pub mod employee;
pub mod error;
pub mod repositories;
pub mod role;

// Re-export commonly used types
pub use authorization::{authorize, Caller, Policy};
pub use credential::{Credential, CredentialRepositoryInterface, NewCredential};
pub use employee::{
    CreateEmployeeDto, Employee, EmployeeRepositoryInterface, NewEmployee, UpdateEmployeeDto,
};
pub use error::{
    AuthErrorCode, CommonErrorCode, DomainError, DomainResult, EmployeeErrorCode, ErrorCode,
};
pub use repositories::RepositoryProvider;
pub use role::{Role, RoleName, RoleRepositoryInterface};
