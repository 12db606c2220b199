//! Migration: Create cold_storages table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ColdStorages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ColdStorages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ColdStorages::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(ColdStorages::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::Address)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::City)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::State)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::TotalCapacity)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(500),
                    )
                    .col(ColumnDef::new(ColdStorages::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(ColdStorages::ManagerId).uuid().null())
                    .col(
                        ColumnDef::new(ColdStorages::ContactPhone)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::ContactEmail)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ColdStorages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cold_storages_owner")
                            .from(ColdStorages::Table, ColdStorages::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cold_storages_manager")
                            .from(ColdStorages::Table, ColdStorages::ManagerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ColdStorages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ColdStorages {
    Table,
    Id,
    Name,
    Code,
    Address,
    City,
    State,
    TotalCapacity,
    OwnerId,
    ManagerId,
    ContactPhone,
    ContactEmail,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
