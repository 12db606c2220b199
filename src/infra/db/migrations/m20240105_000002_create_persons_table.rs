//! Migration: Create persons table (farmers and vendors).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Persons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Persons::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Persons::PersonType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Persons::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Persons::MobileNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Persons::Address)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Persons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Persons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Name search backs the persons ?search= filter
        manager
            .create_index(
                Index::create()
                    .name("idx_persons_name")
                    .table(Persons::Table)
                    .col(Persons::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Persons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Persons {
    Table,
    Id,
    PersonType,
    Name,
    MobileNumber,
    Address,
    CreatedAt,
    UpdatedAt,
}
