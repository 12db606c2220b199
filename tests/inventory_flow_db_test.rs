//! Dispatch and payment flow against a live database.
//!
//! Mock-based tests cannot reach the transactional paths: the
//! transaction context hands out concrete repositories bound to the
//! open transaction. These tests run the real serializable stock
//! check and the payment request insert end to end. They need
//! Postgres, so they are ignored by default; point DATABASE_URL at a
//! migratable database and run with `cargo test -- --ignored`.

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use coldstore_api::config::Config;
use coldstore_api::domain::{
    PackagingType, PaymentMethod, PaymentRequestStatus, PaymentStatus, PersonType,
    PreferredLanguage, QualityGrade,
};
use coldstore_api::errors::AppError;
use coldstore_api::infra::{Database, Persistence, UnitOfWork};
use coldstore_api::services::{
    InventoryManager, InventoryService, InwardInput, PersonDirectory, PersonService,
};

/// Phone and mobile columns are unique; derive a fresh number per run.
fn unique_mobile() -> String {
    format!("9{:09}", Uuid::new_v4().as_u128() % 1_000_000_000)
}

async fn persistence() -> Arc<Persistence> {
    let mut config = Config::for_tests();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }

    let db = Database::connect(&config)
        .await
        .expect("database unavailable; set DATABASE_URL");

    Arc::new(Persistence::new(db.connection().clone()))
}

#[tokio::test]
#[ignore = "needs a running Postgres; set DATABASE_URL and run with --ignored"]
async fn test_dispatch_and_payment_flow_commits_and_rolls_back() {
    let uow = persistence().await;
    let persons = PersonDirectory::new(uow.clone());
    let inventory = InventoryManager::new(uow.clone());

    let operator = uow
        .users()
        .create(
            unique_mobile(),
            "Flow Operator".to_string(),
            PreferredLanguage::default(),
        )
        .await
        .unwrap();

    let farmer = persons
        .create_person(
            PersonType::Farmer,
            "Flow Farmer".to_string(),
            unique_mobile(),
            "Village Road".to_string(),
        )
        .await
        .unwrap();

    let entry = inventory
        .create_inward(
            InwardInput {
                person_id: farmer.id,
                cold_storage_id: None,
                crop_name: "Potato".to_string(),
                crop_variety: "Kufri Jyoti".to_string(),
                size_grade: "large".to_string(),
                quantity: dec!(100),
                packaging_type: PackagingType::Bori,
                quality_grade: QualityGrade::A,
                rack_number: "R1".to_string(),
                storage_room: "Room 1".to_string(),
                expected_storage_duration_days: Some(90),
            },
            operator.id,
        )
        .await
        .unwrap();

    // First dispatch runs the serializable check and commits
    let outward = inventory
        .create_outward(entry.id, dec!(40), PackagingType::Bori, operator.id)
        .await
        .unwrap();
    assert!(outward.receipt_number.starts_with("RCP-"));
    assert_eq!(outward.payment_status, PaymentStatus::Pending);

    // Overdraw is rejected and the rolled-back transaction leaves no row
    let err = inventory
        .create_outward(entry.id, dec!(70), PackagingType::Bori, operator.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock(r) if r == dec!(60)));

    let after = inventory.get_inward(entry.id).await.unwrap();
    assert_eq!(after.remaining_quantity, dec!(60));

    // Payment request and the dispatch status update commit together
    let request = inventory
        .trigger_payment(outward.id, PaymentMethod::Upi)
        .await
        .unwrap();
    assert_eq!(request.outward_entry_id, outward.id);
    assert_eq!(request.status, PaymentRequestStatus::Requested);
    assert_eq!(request.method, "upi");
    assert_eq!(request.payload["mock"], serde_json::json!(true));

    let receipt = inventory.get_receipt(outward.id).await.unwrap();
    assert_eq!(receipt.payment_method, Some(PaymentMethod::Upi));

    // One request per dispatch
    let dup = inventory
        .trigger_payment(outward.id, PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(dup, AppError::Conflict(_)));
}
