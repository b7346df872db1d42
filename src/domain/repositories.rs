//! Repository provider
//!
//! Groups the per-aggregate repositories behind one handle so services
//! take a single `Arc<dyn RepositoryProvider>`.

use super::{CredentialRepositoryInterface, EmployeeRepositoryInterface, RoleRepositoryInterface};

pub trait RepositoryProvider: Send + Sync {
    fn employees(&self) -> &dyn EmployeeRepositoryInterface;
    fn roles(&self) -> &dyn RoleRepositoryInterface;
    fn credentials(&self) -> &dyn CredentialRepositoryInterface;
}
