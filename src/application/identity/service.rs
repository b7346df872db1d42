//! Authentication service
//!
//! Verifies credentials against the stored digest and mints bearer tokens.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{
    AuthErrorCode, Caller, CommonErrorCode, Credential, DomainError, DomainResult, Employee,
    EmployeeErrorCode, RepositoryProvider, RoleName,
};
use crate::infrastructure::crypto::jwt::TokenIssuer;
use crate::infrastructure::crypto::password::{
    hash_password, hash_password_with_salt, verify_password, verify_password_with_salt,
};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: Employee,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, tokens: Arc<TokenIssuer>) -> Self {
        Self { repos, tokens }
    }

    /// Authenticate by email + password and return a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(mut user) = self.repos.employees().get_employee_by_email(email).await? else {
            warn!(email, "Login failed: unknown email");
            return Err(AuthErrorCode::InvalidCredentials.into());
        };

        if !user.is_active {
            warn!(employee_id = user.id, "Login failed: account inactive");
            return Err(EmployeeErrorCode::UserInactive.into());
        }

        let Some(credential) = self.repos.credentials().get_credential(user.id).await? else {
            error!(employee_id = user.id, "Password record missing");
            return Err(CommonErrorCode::InternalServerError.into());
        };

        if !credential_matches(&credential, password) {
            warn!(employee_id = user.id, "Login failed: wrong password");
            return Err(AuthErrorCode::InvalidCredentials.into());
        }

        let role = user
            .role_name
            .get_or_insert_with(|| RoleName::Employee.as_str().to_string())
            .clone();
        let token = self
            .tokens
            .issue(user.id, &user.email, &role)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        info!(employee_id = user.id, email = %user.email, role = %role, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }

    /// The caller's own employee record.
    pub async fn current_user(&self, caller: &Caller) -> DomainResult<Employee> {
        let user_id = caller
            .user_id
            .ok_or_else(|| DomainError::new(AuthErrorCode::TokenInvalid))?;

        self.repos
            .employees()
            .get_employee_by_id(user_id)
            .await?
            .ok_or_else(DomainError::not_found)
    }

    /// Change the caller's password after verifying the current one.
    pub async fn change_password(
        &self,
        caller: &Caller,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user_id = caller
            .user_id
            .ok_or_else(|| DomainError::new(AuthErrorCode::TokenInvalid))?;

        let Some(credential) = self.repos.credentials().get_credential(user_id).await? else {
            return Err(DomainError::not_found());
        };

        if !credential_matches(&credential, current_password) {
            warn!(employee_id = user_id, "Password change rejected: wrong current password");
            return Err(AuthErrorCode::InvalidCredentials.into());
        }

        let new_hash = match credential.salt.as_deref().filter(|s| !s.is_empty()) {
            Some(salt) => hash_password_with_salt(new_password, salt),
            None => hash_password(new_password),
        }
        .map_err(|e| DomainError::with_details(CommonErrorCode::ValidationError, e.to_string()))?;

        if !self
            .repos
            .credentials()
            .update_password_hash(user_id, &new_hash)
            .await?
        {
            return Err(CommonErrorCode::DatabaseError.into());
        }

        info!(employee_id = user_id, "Password changed");
        Ok(())
    }
}

/// The stored salt is honoured only when one is present.
fn credential_matches(credential: &Credential, password: &str) -> bool {
    match credential.salt.as_deref().filter(|s| !s.is_empty()) {
        Some(salt) => verify_password_with_salt(password, salt, &credential.password_hash),
        None => verify_password(password, &credential.password_hash),
    }
}
