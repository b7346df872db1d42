use async_trait::async_trait;

use super::Role;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoleRepositoryInterface: Send + Sync {
    async fn get_role_by_id(&self, id: i32) -> DomainResult<Option<Role>>;
    async fn get_role_by_name(&self, name: &str) -> DomainResult<Option<Role>>;
    /// All roles ordered by name.
    async fn list_roles(&self) -> DomainResult<Vec<Role>>;
}
