//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and use the Unit of Work pattern for
//! repository access and transaction management.

mod auth_service;
pub mod container;
mod inventory_service;
mod payment_service;
mod person_service;
mod report_service;
mod storage_service;
mod temperature_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

// Service traits and implementations
pub use auth_service::{
    AuthService, Authenticator, Claims, OtpIssuedResponse, TokenPairResponse, TOKEN_KIND_ACCESS,
    TOKEN_KIND_REFRESH,
};
pub use inventory_service::{InventoryManager, InventoryService, InwardInput, ReceiptResponse};
pub use payment_service::{PaymentDesk, PaymentService};
pub use person_service::{PersonDirectory, PersonService};
pub use report_service::{
    CropTotal, DashboardResponse, LedgerEntry, LedgerEntryType, LedgerFilter, LedgerResponse,
    LedgerTotals, OwnerDashboardResponse, ReportDesk, ReportService, StorageSummary,
    StorageUtilization,
};
pub use storage_service::{StorageManager, StorageService};
pub use temperature_service::{TemperatureMonitor, TemperatureService};
pub use user_service::{UserManager, UserService};
