//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, InventoryService, PaymentService, PersonService, ReportService, ServiceContainer,
    Services, StorageService, TemperatureService, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub person_service: Arc<dyn PersonService>,
    pub storage_service: Arc<dyn StorageService>,
    pub inventory_service: Arc<dyn InventoryService>,
    pub temperature_service: Arc<dyn TemperatureService>,
    pub payment_service: Arc<dyn PaymentService>,
    pub report_service: Arc<dyn ReportService>,
    /// Database handle for health probes; absent when services are injected
    /// directly (tests)
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.connection().clone(), config);
        Self::from_container(&container, Some(database))
    }

    /// Create application state from an existing service container.
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            person_service: container.persons(),
            storage_service: container.storages(),
            inventory_service: container.inventory(),
            temperature_service: container.temperature(),
            payment_service: container.payments(),
            report_service: container.reports(),
            database,
        }
    }
}
