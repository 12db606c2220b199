//! Domain layer - Core business entities and logic
//!
//! Contains the business concepts independent of infrastructure:
//! users and roles, persons, cold storages, inward/outward inventory,
//! temperature monitoring, and payment requests.

pub mod inventory;
pub mod otp;
pub mod payment;
pub mod person;
pub mod storage;
pub mod temperature;
pub mod user;

pub use inventory::{
    generate_receipt_number, InwardEntry, InwardEntryResponse, OutwardEntry,
    OutwardEntryResponse, PackagingType, PaymentMethod, PaymentStatus, QualityGrade, StockItem,
};
pub use otp::{OtpCode, PhoneOtp};
pub use payment::{PaymentRequest, PaymentRequestResponse, PaymentRequestStatus};
pub use person::{Person, PersonResponse, PersonType};
pub use storage::{ColdStorage, ColdStorageResponse};
pub use temperature::{
    AlertStatus, StorageRoom, StorageRoomResponse, TemperatureAlert, TemperatureAlertResponse,
    TemperatureLog, TemperatureLogResponse,
};
pub use user::{PreferredLanguage, StaffMemberResponse, User, UserResponse, UserRole};
