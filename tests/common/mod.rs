//! Shared test fixtures: a unit-of-work stub wired to mock repositories.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use coldstore_api::domain::{
    InwardEntry, OutwardEntry, PackagingType, PaymentStatus, PreferredLanguage, QualityGrade,
    User, UserRole,
};
use coldstore_api::errors::{AppError, AppResult};
use coldstore_api::infra::repositories::{
    ColdStorageRepository, InventoryRepository, OtpRepository, PaymentRepository,
    PersonRepository, TemperatureRepository, UserRepository,
};
use coldstore_api::infra::{
    MockColdStorageRepository, MockInventoryRepository, MockOtpRepository, MockPaymentRepository,
    MockPersonRepository, MockTemperatureRepository, MockUserRepository, TransactionContext,
    UnitOfWork,
};

/// Unit-of-work stub exposing one mock per repository.
///
/// Transactions are not supported; service paths that run inside a
/// transaction are covered by their handler-level tests instead.
pub struct TestUnitOfWork {
    pub users: Arc<MockUserRepository>,
    pub otps: Arc<MockOtpRepository>,
    pub persons: Arc<MockPersonRepository>,
    pub cold_storages: Arc<MockColdStorageRepository>,
    pub inventory: Arc<MockInventoryRepository>,
    pub temperature: Arc<MockTemperatureRepository>,
    pub payments: Arc<MockPaymentRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            otps: Arc::new(MockOtpRepository::new()),
            persons: Arc::new(MockPersonRepository::new()),
            cold_storages: Arc::new(MockColdStorageRepository::new()),
            inventory: Arc::new(MockInventoryRepository::new()),
            temperature: Arc::new(MockTemperatureRepository::new()),
            payments: Arc::new(MockPaymentRepository::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn otps(&self) -> Arc<dyn OtpRepository> {
        self.otps.clone()
    }

    fn persons(&self) -> Arc<dyn PersonRepository> {
        self.persons.clone()
    }

    fn cold_storages(&self) -> Arc<dyn ColdStorageRepository> {
        self.cold_storages.clone()
    }

    fn inventory(&self) -> Arc<dyn InventoryRepository> {
        self.inventory.clone()
    }

    fn temperature(&self) -> Arc<dyn TemperatureRepository> {
        self.temperature.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test stub"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test stub"))
    }
}

pub fn sample_user(role: Option<UserRole>) -> User {
    User {
        id: Uuid::new_v4(),
        phone_number: "9000000001".to_string(),
        name: "Test User".to_string(),
        preferred_language: PreferredLanguage::English,
        role,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_inward(id: Uuid, quantity: Decimal) -> InwardEntry {
    InwardEntry {
        id,
        person_id: Uuid::new_v4(),
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
        entry_date: Utc::now().date_naive(),
        created_by: Some(Uuid::new_v4()),
        created_at: Utc::now(),
    }
}

pub fn sample_outward(inward_entry_id: Uuid, quantity: Decimal) -> OutwardEntry {
    OutwardEntry {
        id: Uuid::new_v4(),
        inward_entry_id,
        quantity,
        packaging_type: PackagingType::Bori,
        receipt_number: "RCP-5F2A9C01B3D4".to_string(),
        payment_status: PaymentStatus::Pending,
        payment_method: None,
        created_by: Uuid::new_v4(),
        created_at: Utc::now(),
    }
}
