use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::{DomainResult, Role, RoleRepositoryInterface};
use crate::infrastructure::database::entities::role;

use super::db_err;

pub struct RoleRepository {
    db: DatabaseConnection,
}

impl RoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.role_name,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl RoleRepositoryInterface for RoleRepository {
    async fn get_role_by_id(&self, id: i32) -> DomainResult<Option<Role>> {
        let model = role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(role_model_to_domain))
    }

    async fn get_role_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::RoleName.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(role_model_to_domain))
    }

    async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::RoleName)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(role_model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_connection;

    #[tokio::test]
    async fn migration_seeds_both_roles() {
        let repo = RoleRepository::new(test_connection().await);

        let names: Vec<_> = repo
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();
        assert_eq!(names, [(2, "Employee".to_string()), (1, "HR".to_string())]);

        assert_eq!(repo.get_role_by_name("HR").await.unwrap().map(|r| r.id), Some(1));
        assert!(repo.get_role_by_id(99).await.unwrap().is_none());
    }
}
