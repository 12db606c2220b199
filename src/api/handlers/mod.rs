//! HTTP request handlers.

pub mod auth_handler;
pub mod inventory_handler;
pub mod payment_handler;
pub mod person_handler;
pub mod report_handler;
pub mod staff_handler;
pub mod storage_handler;
pub mod temperature_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use inventory_handler::inventory_routes;
pub use payment_handler::payment_routes;
pub use person_handler::person_routes;
pub use report_handler::report_routes;
pub use staff_handler::staff_routes;
pub use storage_handler::storage_routes;
pub use temperature_handler::temperature_routes;
pub use user_handler::user_routes;
