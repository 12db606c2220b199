//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, inventory_handler, payment_handler, person_handler, report_handler,
    staff_handler, storage_handler, temperature_handler, user_handler,
};
use crate::domain::{
    AlertStatus, ColdStorageResponse, InwardEntryResponse, OutwardEntryResponse, PackagingType,
    PaymentMethod, PaymentRequestResponse, PaymentRequestStatus, PaymentStatus, PersonResponse,
    PersonType, PreferredLanguage, QualityGrade, StaffMemberResponse, StockItem,
    StorageRoomResponse, TemperatureAlertResponse, TemperatureLogResponse, UserResponse, UserRole,
};
use crate::services::{
    CropTotal, DashboardResponse, LedgerEntry, LedgerEntryType, LedgerResponse, LedgerTotals,
    OtpIssuedResponse, OwnerDashboardResponse, ReceiptResponse, StorageSummary,
    StorageUtilization, TokenPairResponse,
};

/// OpenAPI documentation for the cold storage backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cold Storage API",
        version = "0.1.0",
        description = "Cold-storage inventory and operations backend: intake, dispatch, \
                       payments, temperature monitoring, and role-based dashboards"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::signup,
        auth_handler::request_otp,
        auth_handler::verify_otp,
        auth_handler::refresh,
        // Users
        user_handler::get_current_user,
        user_handler::update_profile,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::update_user,
        // Staff
        staff_handler::list_staff,
        staff_handler::create_staff,
        staff_handler::update_staff,
        staff_handler::delete_staff,
        staff_handler::toggle_staff_status,
        staff_handler::update_staff_role,
        // Persons
        person_handler::list_persons,
        person_handler::create_person,
        person_handler::get_by_mobile,
        person_handler::get_person,
        person_handler::update_person,
        // Cold storages
        storage_handler::list_storages,
        storage_handler::create_storage,
        storage_handler::get_storage,
        storage_handler::update_storage,
        // Inventory
        inventory_handler::list_inwards,
        inventory_handler::create_inward,
        inventory_handler::stock,
        inventory_handler::get_inward,
        inventory_handler::list_outwards,
        inventory_handler::create_outward,
        inventory_handler::get_outward,
        inventory_handler::get_receipt,
        inventory_handler::trigger_payment,
        // Temperature
        temperature_handler::list_rooms,
        temperature_handler::create_room,
        temperature_handler::update_room,
        temperature_handler::list_logs,
        temperature_handler::create_log,
        temperature_handler::get_log,
        temperature_handler::update_log,
        temperature_handler::list_alerts,
        temperature_handler::acknowledge_alert,
        temperature_handler::resolve_alert,
        // Payments
        payment_handler::list_requests,
        payment_handler::get_request,
        // Reports
        report_handler::dashboard,
        report_handler::owner_dashboard,
        report_handler::ledger,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            PreferredLanguage,
            UserResponse,
            StaffMemberResponse,
            PersonType,
            PersonResponse,
            ColdStorageResponse,
            PackagingType,
            QualityGrade,
            PaymentStatus,
            PaymentMethod,
            InwardEntryResponse,
            OutwardEntryResponse,
            StockItem,
            StorageRoomResponse,
            TemperatureLogResponse,
            AlertStatus,
            TemperatureAlertResponse,
            PaymentRequestStatus,
            PaymentRequestResponse,
            // Auth types
            auth_handler::SignupRequest,
            auth_handler::RequestOtpRequest,
            auth_handler::VerifyOtpRequest,
            auth_handler::RefreshRequest,
            OtpIssuedResponse,
            TokenPairResponse,
            // User/staff request types
            user_handler::UpdateProfileRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            staff_handler::CreateStaffRequest,
            staff_handler::UpdateStaffRequest,
            staff_handler::UpdateStaffRoleRequest,
            // Person/storage request types
            person_handler::CreatePersonRequest,
            person_handler::UpdatePersonRequest,
            storage_handler::CreateColdStorageRequest,
            storage_handler::UpdateColdStorageRequest,
            // Inventory request types
            inventory_handler::CreateInwardRequest,
            inventory_handler::CreateOutwardRequest,
            inventory_handler::TriggerPaymentRequest,
            ReceiptResponse,
            // Temperature request types
            temperature_handler::CreateRoomRequest,
            temperature_handler::UpdateRoomRequest,
            temperature_handler::CreateLogRequest,
            temperature_handler::UpdateLogRequest,
            // Report types
            DashboardResponse,
            StorageSummary,
            CropTotal,
            OwnerDashboardResponse,
            StorageUtilization,
            LedgerResponse,
            LedgerEntry,
            LedgerEntryType,
            LedgerTotals,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Phone + OTP signup, login, and token refresh"),
        (name = "Users", description = "Self-service profile and admin user management"),
        (name = "Staff", description = "Operational staff management"),
        (name = "Persons", description = "Farmer and vendor directory"),
        (name = "Cold Storages", description = "Facility management"),
        (name = "Inventory", description = "Intake, dispatch, stock, and receipts"),
        (name = "Temperature", description = "Rooms, readings, and threshold alerts"),
        (name = "Payments", description = "Mock payment requests"),
        (name = "Reports", description = "Dashboards and the movement ledger")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from /api/auth/verify-otp"))
                        .build(),
                ),
            );
        }
    }
}
