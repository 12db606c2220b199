//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod inventory_repository;
mod otp_repository;
mod payment_repository;
mod person_repository;
mod storage_repository;
mod temperature_repository;
mod user_repository;

pub use inventory_repository::{
    CropQuantity, InventoryRepository, InventoryStore, InwardFilter, NewInwardEntry,
    NewOutwardEntry, StorageQuantity,
};
pub use otp_repository::{OtpRepository, OtpStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use person_repository::{PersonRepository, PersonStore};
pub use storage_repository::{
    ColdStorageRepository, ColdStorageStore, ColdStorageUpdate, NewColdStorage,
};
pub use temperature_repository::{TemperatureRepository, TemperatureStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use inventory_repository::outward_active_model;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use inventory_repository::MockInventoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use otp_repository::MockOtpRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use person_repository::MockPersonRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use storage_repository::MockColdStorageRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use temperature_repository::MockTemperatureRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
