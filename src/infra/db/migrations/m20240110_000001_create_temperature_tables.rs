//! Migration: Create storage_rooms, temperature_logs, and temperature_alerts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StorageRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StorageRooms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StorageRooms::ColdStorageId).uuid().null())
                    .col(ColumnDef::new(StorageRooms::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(StorageRooms::MinTemperature)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageRooms::MaxTemperature)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageRooms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(StorageRooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageRooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_storage_rooms_cold_storage")
                            .from(StorageRooms::Table, StorageRooms::ColdStorageId)
                            .to(ColdStorages::Table, ColdStorages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TemperatureLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemperatureLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TemperatureLogs::StorageRoomId).uuid().null())
                    .col(
                        ColumnDef::new(TemperatureLogs::LoggedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemperatureLogs::Temperature)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TemperatureLogs::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(TemperatureLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemperatureLogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_temperature_logs_storage_room")
                            .from(TemperatureLogs::Table, TemperatureLogs::StorageRoomId)
                            .to(StorageRooms::Table, StorageRooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_temperature_logs_created_by")
                            .from(TemperatureLogs::Table, TemperatureLogs::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Log listings are ordered newest-first by reading time
        manager
            .create_index(
                Index::create()
                    .name("idx_temperature_logs_logged_at")
                    .table(TemperatureLogs::Table)
                    .col(TemperatureLogs::LoggedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TemperatureAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemperatureAlerts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TemperatureAlerts::StorageRoomId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemperatureAlerts::TemperatureLogId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TemperatureAlerts::Temperature)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemperatureAlerts::Message)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TemperatureAlerts::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(TemperatureAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemperatureAlerts::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_temperature_alerts_storage_room")
                            .from(TemperatureAlerts::Table, TemperatureAlerts::StorageRoomId)
                            .to(StorageRooms::Table, StorageRooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_temperature_alerts_log")
                            .from(TemperatureAlerts::Table, TemperatureAlerts::TemperatureLogId)
                            .to(TemperatureLogs::Table, TemperatureLogs::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboard counts active alerts
        manager
            .create_index(
                Index::create()
                    .name("idx_temperature_alerts_status")
                    .table(TemperatureAlerts::Table)
                    .col(TemperatureAlerts::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TemperatureAlerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TemperatureLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StorageRooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StorageRooms {
    Table,
    Id,
    ColdStorageId,
    Name,
    MinTemperature,
    MaxTemperature,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TemperatureLogs {
    Table,
    Id,
    StorageRoomId,
    LoggedAt,
    Temperature,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TemperatureAlerts {
    Table,
    Id,
    StorageRoomId,
    TemperatureLogId,
    Temperature,
    Message,
    Status,
    CreatedAt,
    ResolvedAt,
}

#[derive(Iden)]
enum ColdStorages {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
