//! Migration: Create inward_entries and outward_entries tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InwardEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InwardEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InwardEntries::PersonId).uuid().not_null())
                    .col(ColumnDef::new(InwardEntries::ColdStorageId).uuid().null())
                    .col(
                        ColumnDef::new(InwardEntries::CropName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::CropVariety)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::SizeGrade)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::PackagingType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::QualityGrade)
                            .string_len(1)
                            .not_null()
                            .default("A"),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::RackNumber)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::StorageRoom)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(InwardEntries::ExpectedStorageDurationDays)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(InwardEntries::EntryDate).date().not_null())
                    .col(ColumnDef::new(InwardEntries::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(InwardEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inward_entries_person")
                            .from(InwardEntries::Table, InwardEntries::PersonId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inward_entries_cold_storage")
                            .from(InwardEntries::Table, InwardEntries::ColdStorageId)
                            .to(ColdStorages::Table, ColdStorages::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inward_entries_created_by")
                            .from(InwardEntries::Table, InwardEntries::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inward_entries_crop_name")
                    .table(InwardEntries::Table)
                    .col(InwardEntries::CropName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OutwardEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OutwardEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OutwardEntries::InwardEntryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OutwardEntries::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OutwardEntries::PackagingType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OutwardEntries::ReceiptNumber)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(OutwardEntries::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(OutwardEntries::PaymentMethod)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(OutwardEntries::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(OutwardEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outward_entries_inward_entry")
                            .from(OutwardEntries::Table, OutwardEntries::InwardEntryId)
                            .to(InwardEntries::Table, InwardEntries::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outward_entries_created_by")
                            .from(OutwardEntries::Table, OutwardEntries::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Remaining-stock checks aggregate outwards per inward entry
        manager
            .create_index(
                Index::create()
                    .name("idx_outward_entries_inward_entry")
                    .table(OutwardEntries::Table)
                    .col(OutwardEntries::InwardEntryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OutwardEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InwardEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InwardEntries {
    Table,
    Id,
    PersonId,
    ColdStorageId,
    CropName,
    CropVariety,
    SizeGrade,
    Quantity,
    PackagingType,
    QualityGrade,
    RackNumber,
    StorageRoom,
    ExpectedStorageDurationDays,
    EntryDate,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum OutwardEntries {
    Table,
    Id,
    InwardEntryId,
    Quantity,
    PackagingType,
    ReceiptNumber,
    PaymentStatus,
    PaymentMethod,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Persons {
    Table,
    Id,
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
