//! Create user_passwords table migration

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_employees::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPasswords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserPasswords::UserId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserPasswords::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserPasswords::Salt).string_len(255).null())
                    .col(
                        ColumnDef::new(UserPasswords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserPasswords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_passwords_user_id")
                            .from(UserPasswords::Table, UserPasswords::UserId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserPasswords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserPasswords {
    Table,
    UserId,
    PasswordHash,
    Salt,
    CreatedAt,
    UpdatedAt,
}
