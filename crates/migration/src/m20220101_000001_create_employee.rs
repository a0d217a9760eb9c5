//! Create `employee` table.
//!
//! `id` is assigned by the database; `email` carries the unique index that
//! is the authoritative guard for the duplicate-email rule.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(big_integer(Employee::Id).auto_increment().primary_key())
                    .col(string_len(Employee::FirstName, 128).not_null())
                    .col(string_len(Employee::LastName, 128).not_null())
                    .col(string_len(Employee::Email, 255).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
}
