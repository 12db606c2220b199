//! Migration: Create payment_requests table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentRequests::OutwardEntryId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("requested"),
                    )
                    .col(
                        ColumnDef::new(PaymentRequests::Method)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentRequests::Payload)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_requests_outward_entry")
                            .from(PaymentRequests::Table, PaymentRequests::OutwardEntryId)
                            .to(OutwardEntries::Table, OutwardEntries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PaymentRequests {
    Table,
    Id,
    OutwardEntryId,
    Status,
    Method,
    Payload,
    CreatedAt,
}

#[derive(Iden)]
enum OutwardEntries {
    Table,
    Id,
}
