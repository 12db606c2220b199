//! Report service unit tests: dashboard aggregates and the ledger.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use coldstore_api::infra::{
    MockColdStorageRepository, MockInventoryRepository, MockTemperatureRepository,
    MockUserRepository,
};
use coldstore_api::services::{LedgerEntryType, LedgerFilter, ReportDesk, ReportService};

use common::{sample_inward, sample_outward, TestUnitOfWork};

fn desk(uow: TestUnitOfWork) -> ReportDesk<TestUnitOfWork> {
    ReportDesk::new(Arc::new(uow))
}

fn dashboard_uow(
    capacity: Option<Decimal>,
    inward_total: Decimal,
    outward_total: Decimal,
) -> TestUnitOfWork {
    let mut cold_storages = MockColdStorageRepository::new();
    cold_storages
        .expect_total_active_capacity()
        .returning(move || Ok(capacity));

    let mut inventory = MockInventoryRepository::new();
    inventory
        .expect_total_inward_quantity()
        .returning(move || Ok(inward_total));
    inventory
        .expect_total_outward_quantity()
        .returning(move || Ok(outward_total));
    inventory.expect_inward_count_since().returning(|_| Ok(4));
    inventory.expect_inventory_by_crop().returning(|_| Ok(vec![]));

    let mut temperature = MockTemperatureRepository::new();
    temperature.expect_active_alert_count().returning(|| Ok(2));

    let mut users = MockUserRepository::new();
    users.expect_staff_count().returning(|| Ok(5));

    TestUnitOfWork {
        cold_storages: Arc::new(cold_storages),
        inventory: Arc::new(inventory),
        temperature: Arc::new(temperature),
        users: Arc::new(users),
        ..TestUnitOfWork::default()
    }
}

#[tokio::test]
async fn test_dashboard_computes_occupancy() {
    let desk = desk(dashboard_uow(Some(dec!(200)), dec!(80), dec!(30)));

    let dashboard = desk.dashboard().await.unwrap();
    assert_eq!(dashboard.storage.total_capacity, dec!(200));
    assert_eq!(dashboard.storage.occupied, dec!(50));
    assert_eq!(dashboard.storage.available, dec!(150));
    assert_eq!(dashboard.pending_requests, 4);
    assert_eq!(dashboard.active_alerts, 2);
    assert_eq!(dashboard.staff_count, 5);
}

#[tokio::test]
async fn test_dashboard_occupancy_floors_at_zero() {
    // Dispatches exceeding intakes must not produce negative occupancy
    let desk = desk(dashboard_uow(Some(dec!(200)), dec!(10), dec!(30)));

    let dashboard = desk.dashboard().await.unwrap();
    assert_eq!(dashboard.storage.occupied, Decimal::ZERO);
    assert_eq!(dashboard.storage.available, dec!(200));
}

#[tokio::test]
async fn test_dashboard_falls_back_to_default_capacity() {
    let desk = desk(dashboard_uow(None, dec!(80), dec!(30)));

    let dashboard = desk.dashboard().await.unwrap();
    assert_eq!(dashboard.storage.total_capacity, dec!(500));
}

#[tokio::test]
async fn test_ledger_merges_movements_in_time_order() {
    let base = Utc::now();

    let mut early_inward = sample_inward(Uuid::new_v4(), dec!(100));
    early_inward.created_at = base - Duration::hours(3);
    let mut late_inward = sample_inward(Uuid::new_v4(), dec!(50));
    late_inward.created_at = base - Duration::hours(1);

    let mut outward = sample_outward(early_inward.id, dec!(30));
    outward.created_at = base - Duration::hours(2);

    let mut inventory = MockInventoryRepository::new();
    let inwards = vec![early_inward, late_inward];
    inventory
        .expect_inwards_between()
        .returning(move |_, _, _| Ok(inwards.clone()));
    let outwards = vec![outward];
    inventory
        .expect_outwards_between()
        .returning(move |_, _, _| Ok(outwards.clone()));

    let desk = desk(TestUnitOfWork {
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let ledger = desk.ledger(LedgerFilter::default()).await.unwrap();

    let kinds: Vec<LedgerEntryType> = ledger.entries.iter().map(|e| e.entry_type).collect();
    assert_eq!(
        kinds,
        vec![
            LedgerEntryType::Inward,
            LedgerEntryType::Outward,
            LedgerEntryType::Inward,
        ]
    );
    assert!(ledger
        .entries
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));

    assert_eq!(ledger.totals.inward_total, dec!(150));
    assert_eq!(ledger.totals.outward_total, dec!(30));
    assert_eq!(ledger.totals.net, dec!(120));

    // Outward rows carry the receipt, inward rows the crop and person
    let outward_row = &ledger.entries[1];
    assert!(outward_row.receipt_number.as_deref().unwrap().starts_with("RCP-"));
    assert!(ledger.entries[0].crop_name.is_some());
}

#[tokio::test]
async fn test_ledger_with_no_movements() {
    let mut inventory = MockInventoryRepository::new();
    inventory
        .expect_inwards_between()
        .returning(|_, _, _| Ok(vec![]));
    inventory
        .expect_outwards_between()
        .returning(|_, _, _| Ok(vec![]));

    let desk = desk(TestUnitOfWork {
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let ledger = desk.ledger(LedgerFilter::default()).await.unwrap();
    assert!(ledger.entries.is_empty());
    assert_eq!(ledger.totals.net, Decimal::ZERO);
}
