use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::{Credential, CredentialRepositoryInterface, DomainResult};
use crate::infrastructure::database::entities::user_password;

use super::db_err;

pub struct CredentialRepository {
    db: DatabaseConnection,
}

impl CredentialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn credential_model_to_domain(model: user_password::Model) -> Credential {
    Credential {
        user_id: model.user_id,
        password_hash: model.password_hash,
        salt: model.salt,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl CredentialRepositoryInterface for CredentialRepository {
    async fn get_credential(&self, user_id: i32) -> DomainResult<Option<Credential>> {
        let model = user_password::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(credential_model_to_domain))
    }

    async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> DomainResult<bool> {
        let result = user_password::Entity::update_many()
            .col_expr(
                user_password::Column::PasswordHash,
                Expr::value(password_hash.to_string()),
            )
            .col_expr(user_password::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user_password::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
