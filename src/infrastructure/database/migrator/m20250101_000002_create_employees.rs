//! Create employees table migration

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_roles::Roles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::Email)
                            .string_len(255)
                            .not_null()
                            .extra("COLLATE NOCASE")
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Employees::Address).string_len(255).null())
                    .col(ColumnDef::new(Employees::CellNumber).string_len(20).null())
                    .col(ColumnDef::new(Employees::RoleId).integer().not_null())
                    .col(
                        ColumnDef::new(Employees::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_role_id")
                            .from(Employees::Table, Employees::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_role_id")
                    .table(Employees::Table)
                    .col(Employees::RoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Employees {
    Table,
    Id,
    Email,
    Name,
    Address,
    CellNumber,
    RoleId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
