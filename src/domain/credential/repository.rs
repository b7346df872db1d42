use async_trait::async_trait;

use super::Credential;
use crate::domain::DomainResult;

#[async_trait]
pub trait CredentialRepositoryInterface: Send + Sync {
    async fn get_credential(&self, user_id: i32) -> DomainResult<Option<Credential>>;
    /// Returns `false` when the user has no credential row.
    async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> DomainResult<bool>;
}
