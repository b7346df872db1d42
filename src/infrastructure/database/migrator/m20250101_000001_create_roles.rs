//! Create roles table and seed the two fixed roles

use chrono::Utc;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Roles::RoleName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Roles::Description).string_len(255).null())
                    .col(
                        ColumnDef::new(Roles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Roles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        let now = Utc::now();
        let seed = Query::insert()
            .into_table(Roles::Table)
            .columns([
                Roles::Id,
                Roles::RoleName,
                Roles::Description,
                Roles::CreatedAt,
                Roles::UpdatedAt,
            ])
            .values_panic([
                1.into(),
                "HR".into(),
                "Human Resources - full access to employee records".into(),
                now.into(),
                now.into(),
            ])
            .values_panic([
                2.into(),
                "Employee".into(),
                "Regular employee - access to own record".into(),
                now.into(),
                now.into(),
            ])
            .to_owned();
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Roles {
    Table,
    Id,
    RoleName,
    Description,
    CreatedAt,
    UpdatedAt,
}
