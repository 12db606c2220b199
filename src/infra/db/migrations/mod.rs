//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_phone_otps_table;
mod m20240105_000001_create_cold_storages_table;
mod m20240105_000002_create_persons_table;
mod m20240105_000003_create_inventory_tables;
mod m20240110_000001_create_temperature_tables;
mod m20240115_000001_create_payment_requests_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_phone_otps_table::Migration),
            Box::new(m20240105_000001_create_cold_storages_table::Migration),
            Box::new(m20240105_000002_create_persons_table::Migration),
            Box::new(m20240105_000003_create_inventory_tables::Migration),
            Box::new(m20240110_000001_create_temperature_tables::Migration),
            Box::new(m20240115_000001_create_payment_requests_table::Migration),
        ]
    }
}
