//! Inventory service unit tests: intake, derived stock, receipts.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use coldstore_api::domain::{PackagingType, PaymentStatus, PersonType, QualityGrade};
use coldstore_api::errors::AppError;
use coldstore_api::infra::{MockInventoryRepository, MockPersonRepository};
use coldstore_api::services::{InventoryManager, InventoryService, InwardInput};
use coldstore_api::types::PaginationParams;

use common::{sample_inward, sample_outward, TestUnitOfWork};

fn service(uow: TestUnitOfWork) -> InventoryManager<TestUnitOfWork> {
    InventoryManager::new(Arc::new(uow))
}

fn inward_input(person_id: Uuid, quantity: Decimal) -> InwardInput {
    InwardInput {
        person_id,
        cold_storage_id: None,
        crop_name: "Potato".to_string(),
        crop_variety: "Kufri".to_string(),
        size_grade: "Large".to_string(),
        quantity,
        packaging_type: PackagingType::Bori,
        quality_grade: QualityGrade::A,
        rack_number: "R-4".to_string(),
        storage_room: "Chamber 1".to_string(),
        expected_storage_duration_days: Some(90),
    }
}

fn sample_person(id: Uuid) -> coldstore_api::domain::Person {
    coldstore_api::domain::Person {
        id,
        person_type: PersonType::Farmer,
        name: "Ram Kumar".to_string(),
        mobile_number: "9111111111".to_string(),
        address: "Village Rampur".to_string(),
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_get_inward_computes_remaining_quantity() {
    let entry_id = Uuid::new_v4();

    let mut inventory = MockInventoryRepository::new();
    inventory
        .expect_find_inward()
        .returning(move |id| Ok(Some(sample_inward(id, dec!(100)))));
    inventory
        .expect_outward_total_for()
        .returning(|_| Ok(dec!(25)));

    let service = service(TestUnitOfWork {
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let entry = service.get_inward(entry_id).await.unwrap();
    assert_eq!(entry.quantity, dec!(100));
    assert_eq!(entry.remaining_quantity, dec!(75));
}

#[tokio::test]
async fn test_get_inward_not_found() {
    let mut inventory = MockInventoryRepository::new();
    inventory.expect_find_inward().returning(|_| Ok(None));

    let service = service(TestUnitOfWork {
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let result = service.get_inward(Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_create_inward_requires_existing_person() {
    let mut persons = MockPersonRepository::new();
    persons.expect_find_by_id().returning(|_| Ok(None));

    let service = service(TestUnitOfWork {
        persons: Arc::new(persons),
        ..TestUnitOfWork::default()
    });

    let result = service
        .create_inward(inward_input(Uuid::new_v4(), dec!(10)), Uuid::new_v4())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_inward_rejects_nonpositive_quantity() {
    let service = service(TestUnitOfWork::default());

    let result = service
        .create_inward(inward_input(Uuid::new_v4(), Decimal::ZERO), Uuid::new_v4())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_inward_stamps_entry_date_and_creator() {
    let operator_id = Uuid::new_v4();

    let mut persons = MockPersonRepository::new();
    persons
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_person(id))));

    let mut inventory = MockInventoryRepository::new();
    inventory.expect_create_inward().returning(|new| {
        let mut entry = sample_inward(Uuid::new_v4(), new.quantity);
        entry.person_id = new.person_id;
        entry.entry_date = new.entry_date;
        entry.created_by = new.created_by;
        Ok(entry)
    });

    let service = service(TestUnitOfWork {
        persons: Arc::new(persons),
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let entry = service
        .create_inward(inward_input(Uuid::new_v4(), dec!(40)), operator_id)
        .await
        .unwrap();

    assert_eq!(entry.entry_date, chrono::Utc::now().date_naive());
    assert_eq!(entry.created_by, Some(operator_id));
    // Nothing dispatched yet
    assert_eq!(entry.remaining_quantity, dec!(40));
}

#[tokio::test]
async fn test_stock_excludes_drained_entries() {
    let drained = Uuid::new_v4();
    let holding = Uuid::new_v4();

    let mut inventory = MockInventoryRepository::new();
    inventory.expect_list_inwards_unpaged().returning(move |_| {
        Ok(vec![
            sample_inward(drained, dec!(100)),
            sample_inward(holding, dec!(50)),
        ])
    });
    inventory.expect_outward_totals().returning(move |_| {
        let mut totals = HashMap::new();
        totals.insert(drained, dec!(100));
        totals.insert(holding, dec!(20));
        Ok(totals)
    });

    let service = service(TestUnitOfWork {
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let stock = service.stock(None, None).await.unwrap();
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].id, holding);
    assert_eq!(stock[0].remaining_quantity, dec!(30));
}

#[tokio::test]
async fn test_list_inwards_pagination_meta() {
    let mut inventory = MockInventoryRepository::new();
    inventory.expect_list_inwards().returning(|_, _| {
        Ok((
            vec![
                sample_inward(Uuid::new_v4(), dec!(10)),
                sample_inward(Uuid::new_v4(), dec!(20)),
            ],
            42,
        ))
    });
    inventory
        .expect_outward_totals()
        .returning(|_| Ok(HashMap::new()));

    let service = service(TestUnitOfWork {
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let page = service
        .list_inwards(
            Default::default(),
            PaginationParams {
                page: 2,
                per_page: 20,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total, 42);
    assert_eq!(page.meta.total_pages, 3);
}

#[tokio::test]
async fn test_get_receipt_returns_payment_fields() {
    let outward_id = Uuid::new_v4();

    let mut inventory = MockInventoryRepository::new();
    inventory
        .expect_find_outward()
        .returning(|_| Ok(Some(sample_outward(Uuid::new_v4(), dec!(25)))));

    let service = service(TestUnitOfWork {
        inventory: Arc::new(inventory),
        ..TestUnitOfWork::default()
    });

    let receipt = service.get_receipt(outward_id).await.unwrap();
    assert!(receipt.receipt_number.starts_with("RCP-"));
    assert_eq!(receipt.payment_status, PaymentStatus::Pending);
    assert_eq!(receipt.payment_method, None);
    assert_eq!(receipt.quantity, dec!(25));
}
