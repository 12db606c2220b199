//! Migration: Create phone_otps table for OTP login codes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhoneOtps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PhoneOtps::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PhoneOtps::PhoneNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhoneOtps::CodeHash)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhoneOtps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhoneOtps::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhoneOtps::UsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Verification fetches the newest unused code per phone number
        manager
            .create_index(
                Index::create()
                    .name("idx_phone_otps_phone_created")
                    .table(PhoneOtps::Table)
                    .col(PhoneOtps::PhoneNumber)
                    .col(PhoneOtps::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_phone_otps_expires_at")
                    .table(PhoneOtps::Table)
                    .col(PhoneOtps::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhoneOtps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PhoneOtps {
    Table,
    Id,
    PhoneNumber,
    CodeHash,
    CreatedAt,
    ExpiresAt,
    UsedAt,
}
