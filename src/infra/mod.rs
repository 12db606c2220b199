//! Infrastructure layer: database, repositories, and transactions.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::Database;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockColdStorageRepository, MockInventoryRepository, MockOtpRepository,
    MockPaymentRepository, MockPersonRepository, MockTemperatureRepository, MockUserRepository,
};
