//! Service Container - Centralized service access.
//!
//! Holds one Arc per service trait so handlers depend on abstractions
//! rather than concrete implementations.

use std::sync::Arc;

use super::{
    AuthService, InventoryService, PaymentService, PersonService, ReportService, StorageService,
    TemperatureService, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user and staff service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get person directory service
    fn persons(&self) -> Arc<dyn PersonService>;

    /// Get cold storage service
    fn storages(&self) -> Arc<dyn StorageService>;

    /// Get inventory service
    fn inventory(&self) -> Arc<dyn InventoryService>;

    /// Get temperature service
    fn temperature(&self) -> Arc<dyn TemperatureService>;

    /// Get payment service
    fn payments(&self) -> Arc<dyn PaymentService>;

    /// Get reporting service
    fn reports(&self) -> Arc<dyn ReportService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    person_service: Arc<dyn PersonService>,
    storage_service: Arc<dyn StorageService>,
    inventory_service: Arc<dyn InventoryService>,
    temperature_service: Arc<dyn TemperatureService>,
    payment_service: Arc<dyn PaymentService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            Authenticator, InventoryManager, PaymentDesk, PersonDirectory, ReportDesk,
            StorageManager, TemperatureMonitor, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            person_service: Arc::new(PersonDirectory::new(uow.clone())),
            storage_service: Arc::new(StorageManager::new(uow.clone())),
            inventory_service: Arc::new(InventoryManager::new(uow.clone())),
            temperature_service: Arc::new(TemperatureMonitor::new(uow.clone())),
            payment_service: Arc::new(PaymentDesk::new(uow.clone())),
            report_service: Arc::new(ReportDesk::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn persons(&self) -> Arc<dyn PersonService> {
        self.person_service.clone()
    }

    fn storages(&self) -> Arc<dyn StorageService> {
        self.storage_service.clone()
    }

    fn inventory(&self) -> Arc<dyn InventoryService> {
        self.inventory_service.clone()
    }

    fn temperature(&self) -> Arc<dyn TemperatureService> {
        self.temperature_service.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}
