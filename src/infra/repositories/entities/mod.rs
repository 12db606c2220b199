//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod cold_storage;
pub mod inward_entry;
pub mod outward_entry;
pub mod payment_request;
pub mod person;
pub mod phone_otp;
pub mod storage_room;
pub mod temperature_alert;
pub mod temperature_log;
pub mod user;
