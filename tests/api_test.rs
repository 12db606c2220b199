//! Integration tests for API endpoints.
//!
//! These tests drive the full router through stub services, without a
//! database connection. Authentication uses fixed tokens mapped to
//! roles by the stub auth service.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use coldstore_api::api::{create_router, AppState};
use coldstore_api::domain::{
    AlertStatus, ColdStorage, ColdStorageResponse, InwardEntryResponse, OutwardEntryResponse,
    PackagingType, PaymentMethod, PaymentRequestResponse, PaymentRequestStatus, PaymentStatus,
    Person, PersonResponse, PersonType, PreferredLanguage, StaffMemberResponse,
    StorageRoomResponse, TemperatureAlertResponse, TemperatureLogResponse, UserResponse, UserRole,
};
use coldstore_api::errors::{AppError, AppResult};
use coldstore_api::infra::repositories::{ColdStorageUpdate, InwardFilter, NewColdStorage};
use coldstore_api::services::{
    AuthService, Claims, CropTotal, DashboardResponse, InventoryService, InwardInput,
    LedgerFilter, LedgerResponse, LedgerTotals, OtpIssuedResponse, OwnerDashboardResponse,
    PaymentService, PersonService, ReceiptResponse, ReportService, ServiceContainer,
    StorageService, StorageSummary, TemperatureService, TokenPairResponse, UserService,
};
use coldstore_api::types::{Paginated, PaginationParams};

use common::{sample_inward, sample_outward, sample_user};

// Remaining stock the stub inventory pretends every entry holds
const STUB_REMAINING: Decimal = dec!(25.5);

// =============================================================================
// Stub Services
// =============================================================================

fn token_pair() -> TokenPairResponse {
    TokenPairResponse {
        access: "stub-access".to_string(),
        refresh: "stub-refresh".to_string(),
        expires_in: 86_400,
        user: UserResponse::from(sample_user(Some(UserRole::Operator))),
    }
}

fn otp_issued() -> OtpIssuedResponse {
    OtpIssuedResponse {
        detail: "OTP sent".to_string(),
        code: Some("483920".to_string()),
    }
}

fn claims_with(role: Option<&str>) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: Uuid::new_v4(),
        phone: "9000000001".to_string(),
        role: role.map(String::from),
        kind: "access".to_string(),
        exp: now + 3600,
        iat: now,
    }
}

struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn signup(
        &self,
        _phone_number: String,
        _name: String,
        _preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<OtpIssuedResponse> {
        Ok(otp_issued())
    }

    async fn request_otp(&self, _phone_number: String) -> AppResult<OtpIssuedResponse> {
        Ok(otp_issued())
    }

    async fn verify_otp(
        &self,
        _phone_number: String,
        code: String,
    ) -> AppResult<TokenPairResponse> {
        if code == "123456" {
            Ok(token_pair())
        } else {
            Err(AppError::InvalidOtp)
        }
    }

    async fn refresh(&self, _refresh_token: String) -> AppResult<TokenPairResponse> {
        Ok(token_pair())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        match token {
            "owner-token" => Ok(claims_with(Some("owner"))),
            "admin-token" => Ok(claims_with(Some("admin"))),
            "manager-token" => Ok(claims_with(Some("manager"))),
            "operator-token" => Ok(claims_with(Some("operator"))),
            "technician-token" => Ok(claims_with(Some("technician"))),
            "norole-token" => Ok(claims_with(None)),
            _ => Err(AppError::Unauthorized),
        }
    }
}

fn user_response() -> UserResponse {
    UserResponse::from(sample_user(Some(UserRole::Operator)))
}

fn staff_response() -> StaffMemberResponse {
    StaffMemberResponse::from(sample_user(Some(UserRole::Operator)))
}

struct StubUserService;

#[async_trait]
impl UserService for StubUserService {
    async fn get_user(&self, _id: Uuid) -> AppResult<UserResponse> {
        Ok(user_response())
    }

    async fn update_profile(
        &self,
        _id: Uuid,
        _name: Option<String>,
        _preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<UserResponse> {
        Ok(user_response())
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<UserResponse>> {
        Ok(Paginated::new(
            vec![user_response(), user_response()],
            params.page,
            params.limit(),
            2,
        ))
    }

    async fn create_user(
        &self,
        _phone_number: String,
        _name: String,
        _preferred_language: Option<PreferredLanguage>,
        _role: Option<UserRole>,
    ) -> AppResult<UserResponse> {
        Ok(user_response())
    }

    async fn update_user(
        &self,
        _id: Uuid,
        _name: Option<String>,
        _preferred_language: Option<PreferredLanguage>,
        _role: Option<UserRole>,
        _is_active: Option<bool>,
    ) -> AppResult<UserResponse> {
        Ok(user_response())
    }

    async fn list_staff(&self) -> AppResult<Vec<StaffMemberResponse>> {
        Ok(vec![staff_response()])
    }

    async fn create_staff(
        &self,
        _phone_number: String,
        _name: String,
        _role: UserRole,
        _preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<StaffMemberResponse> {
        Ok(staff_response())
    }

    async fn update_staff(
        &self,
        _id: Uuid,
        _name: Option<String>,
        _role: Option<UserRole>,
    ) -> AppResult<StaffMemberResponse> {
        Ok(staff_response())
    }

    async fn delete_staff(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }

    async fn toggle_staff_status(&self, _id: Uuid) -> AppResult<StaffMemberResponse> {
        Ok(staff_response())
    }

    async fn update_staff_role(
        &self,
        _id: Uuid,
        _role: UserRole,
    ) -> AppResult<StaffMemberResponse> {
        Ok(staff_response())
    }
}

fn person_response() -> PersonResponse {
    PersonResponse::from(Person {
        id: Uuid::new_v4(),
        person_type: PersonType::Farmer,
        name: "Ram Kumar".to_string(),
        mobile_number: "9111111111".to_string(),
        address: "Village Rampur".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    })
}

struct StubPersonService;

#[async_trait]
impl PersonService for StubPersonService {
    async fn get_person(&self, _id: Uuid) -> AppResult<PersonResponse> {
        Ok(person_response())
    }

    async fn get_by_mobile(&self, _mobile_number: &str) -> AppResult<PersonResponse> {
        Ok(person_response())
    }

    async fn create_person(
        &self,
        _person_type: PersonType,
        _name: String,
        _mobile_number: String,
        _address: String,
    ) -> AppResult<PersonResponse> {
        Ok(person_response())
    }

    async fn update_person(
        &self,
        _id: Uuid,
        _name: Option<String>,
        _mobile_number: Option<String>,
        _address: Option<String>,
        _person_type: Option<PersonType>,
    ) -> AppResult<PersonResponse> {
        Ok(person_response())
    }

    async fn list_persons(
        &self,
        _search: Option<String>,
        _person_type: Option<PersonType>,
        params: PaginationParams,
    ) -> AppResult<Paginated<PersonResponse>> {
        Ok(Paginated::new(vec![], params.page, params.limit(), 0))
    }
}

fn storage_response() -> ColdStorageResponse {
    ColdStorageResponse::from(ColdStorage {
        id: Uuid::new_v4(),
        name: "Hilltop Cold Store".to_string(),
        code: "HCS-01".to_string(),
        address: "NH-7".to_string(),
        city: "Nashik".to_string(),
        state: "Maharashtra".to_string(),
        total_capacity: dec!(500),
        owner_id: Uuid::new_v4(),
        manager_id: None,
        contact_phone: "9222222222".to_string(),
        contact_email: "ops@hilltop.example".to_string(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    })
}

struct StubStorageService;

#[async_trait]
impl StorageService for StubStorageService {
    async fn get_storage(&self, _id: Uuid) -> AppResult<ColdStorageResponse> {
        Ok(storage_response())
    }

    async fn create_storage(&self, _new: NewColdStorage) -> AppResult<ColdStorageResponse> {
        Ok(storage_response())
    }

    async fn update_storage(
        &self,
        _id: Uuid,
        _update: ColdStorageUpdate,
    ) -> AppResult<ColdStorageResponse> {
        Ok(storage_response())
    }

    async fn list_storages(
        &self,
        params: PaginationParams,
    ) -> AppResult<Paginated<ColdStorageResponse>> {
        Ok(Paginated::new(vec![storage_response()], params.page, params.limit(), 1))
    }
}

struct StubInventoryService;

#[async_trait]
impl InventoryService for StubInventoryService {
    async fn create_inward(
        &self,
        input: InwardInput,
        _created_by: Uuid,
    ) -> AppResult<InwardEntryResponse> {
        let entry = sample_inward(Uuid::new_v4(), input.quantity);
        Ok(InwardEntryResponse::from_entry(entry, Decimal::ZERO))
    }

    async fn get_inward(&self, id: Uuid) -> AppResult<InwardEntryResponse> {
        Ok(InwardEntryResponse::from_entry(
            sample_inward(id, dec!(100)),
            dec!(100) - STUB_REMAINING,
        ))
    }

    async fn list_inwards(
        &self,
        _filter: InwardFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<InwardEntryResponse>> {
        let entry = InwardEntryResponse::from_entry(
            sample_inward(Uuid::new_v4(), dec!(100)),
            Decimal::ZERO,
        );
        Ok(Paginated::new(vec![entry], params.page, params.limit(), 1))
    }

    async fn stock(
        &self,
        _person_id: Option<Uuid>,
        _crop: Option<String>,
    ) -> AppResult<Vec<coldstore_api::domain::StockItem>> {
        Ok(vec![])
    }

    async fn create_outward(
        &self,
        inward_entry_id: Uuid,
        quantity: Decimal,
        _packaging_type: PackagingType,
        _created_by: Uuid,
    ) -> AppResult<OutwardEntryResponse> {
        if quantity > STUB_REMAINING {
            return Err(AppError::InsufficientStock(STUB_REMAINING));
        }
        Ok(OutwardEntryResponse::from(sample_outward(
            inward_entry_id,
            quantity,
        )))
    }

    async fn get_outward(&self, id: Uuid) -> AppResult<OutwardEntryResponse> {
        Ok(OutwardEntryResponse::from(sample_outward(id, dec!(10))))
    }

    async fn list_outwards(
        &self,
        _inward_entry_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<Paginated<OutwardEntryResponse>> {
        Ok(Paginated::new(vec![], params.page, params.limit(), 0))
    }

    async fn get_receipt(&self, _outward_entry_id: Uuid) -> AppResult<ReceiptResponse> {
        Ok(ReceiptResponse {
            receipt_number: "RCP-5F2A9C01B3D4".to_string(),
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            quantity: dec!(10),
            created_at: Utc::now(),
        })
    }

    async fn trigger_payment(
        &self,
        outward_entry_id: Uuid,
        method: PaymentMethod,
    ) -> AppResult<PaymentRequestResponse> {
        Ok(payment_request(outward_entry_id, method))
    }
}

fn payment_request(outward_entry_id: Uuid, method: PaymentMethod) -> PaymentRequestResponse {
    PaymentRequestResponse {
        id: Uuid::new_v4(),
        outward_entry_id,
        status: PaymentRequestStatus::Requested,
        method: method.as_str().to_string(),
        payload: json!({"mock": true}),
        created_at: Utc::now(),
    }
}

fn room_response() -> StorageRoomResponse {
    StorageRoomResponse {
        id: Uuid::new_v4(),
        cold_storage_id: None,
        name: "Chamber 1".to_string(),
        min_temperature: dec!(2),
        max_temperature: dec!(8),
        is_active: true,
        created_at: Utc::now(),
    }
}

fn log_response() -> TemperatureLogResponse {
    TemperatureLogResponse {
        id: Uuid::new_v4(),
        storage_room_id: Some(Uuid::new_v4()),
        logged_at: Utc::now(),
        temperature: dec!(4.25),
        created_by: Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn alert_response(status: AlertStatus) -> TemperatureAlertResponse {
    TemperatureAlertResponse {
        id: Uuid::new_v4(),
        storage_room_id: Uuid::new_v4(),
        temperature_log_id: None,
        temperature: dec!(12.5),
        message: "Temperature 12.5°C outside range 2°C to 8°C in Chamber 1".to_string(),
        status,
        created_at: Utc::now(),
        resolved_at: None,
    }
}

struct StubTemperatureService;

#[async_trait]
impl TemperatureService for StubTemperatureService {
    async fn create_room(
        &self,
        _cold_storage_id: Option<Uuid>,
        _name: String,
        _min_temperature: Decimal,
        _max_temperature: Decimal,
    ) -> AppResult<StorageRoomResponse> {
        Ok(room_response())
    }

    async fn list_rooms(&self) -> AppResult<Vec<StorageRoomResponse>> {
        Ok(vec![room_response()])
    }

    async fn update_room(
        &self,
        _id: Uuid,
        _name: Option<String>,
        _min_temperature: Option<Decimal>,
        _max_temperature: Option<Decimal>,
        _is_active: Option<bool>,
    ) -> AppResult<StorageRoomResponse> {
        Ok(room_response())
    }

    async fn create_log(
        &self,
        _storage_room_id: Uuid,
        _logged_at: Option<DateTime<Utc>>,
        _temperature: Decimal,
        _created_by: Uuid,
    ) -> AppResult<TemperatureLogResponse> {
        Ok(log_response())
    }

    async fn get_log(&self, _id: Uuid) -> AppResult<TemperatureLogResponse> {
        Ok(log_response())
    }

    async fn list_logs(
        &self,
        _storage_room_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<Paginated<TemperatureLogResponse>> {
        Ok(Paginated::new(vec![log_response()], params.page, params.limit(), 1))
    }

    async fn update_log(
        &self,
        _id: Uuid,
        _logged_at: Option<DateTime<Utc>>,
        _temperature: Option<Decimal>,
    ) -> AppResult<TemperatureLogResponse> {
        Ok(log_response())
    }

    async fn list_alerts(
        &self,
        status: Option<AlertStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<TemperatureAlertResponse>> {
        let alert = alert_response(status.unwrap_or(AlertStatus::Active));
        Ok(Paginated::new(vec![alert], params.page, params.limit(), 1))
    }

    async fn acknowledge_alert(&self, _id: Uuid) -> AppResult<TemperatureAlertResponse> {
        Ok(alert_response(AlertStatus::Acknowledged))
    }

    async fn resolve_alert(&self, _id: Uuid) -> AppResult<TemperatureAlertResponse> {
        Ok(alert_response(AlertStatus::Resolved))
    }
}

struct StubPaymentService;

#[async_trait]
impl PaymentService for StubPaymentService {
    async fn list_requests(
        &self,
        _status: Option<PaymentRequestStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<PaymentRequestResponse>> {
        let request = payment_request(Uuid::new_v4(), PaymentMethod::Upi);
        Ok(Paginated::new(vec![request], params.page, params.limit(), 1))
    }

    async fn get_request(&self, id: Uuid) -> AppResult<PaymentRequestResponse> {
        let mut request = payment_request(Uuid::new_v4(), PaymentMethod::Upi);
        request.id = id;
        Ok(request)
    }
}

struct StubReportService;

#[async_trait]
impl ReportService for StubReportService {
    async fn dashboard(&self) -> AppResult<DashboardResponse> {
        Ok(DashboardResponse {
            storage: StorageSummary {
                total_capacity: dec!(500),
                occupied: dec!(180.5),
                available: dec!(319.5),
            },
            pending_requests: 4,
            active_alerts: 1,
            staff_count: 5,
            inventory_by_crop: vec![CropTotal {
                crop_name: "Potato".to_string(),
                total_quantity: dec!(180.5),
            }],
        })
    }

    async fn owner_dashboard(&self) -> AppResult<OwnerDashboardResponse> {
        Ok(OwnerDashboardResponse { storages: vec![] })
    }

    async fn ledger(&self, _filter: LedgerFilter) -> AppResult<LedgerResponse> {
        Ok(LedgerResponse {
            entries: vec![],
            totals: LedgerTotals {
                inward_total: Decimal::ZERO,
                outward_total: Decimal::ZERO,
                net: Decimal::ZERO,
            },
        })
    }
}

struct StubContainer;

impl ServiceContainer for StubContainer {
    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(StubAuthService)
    }

    fn users(&self) -> Arc<dyn UserService> {
        Arc::new(StubUserService)
    }

    fn persons(&self) -> Arc<dyn PersonService> {
        Arc::new(StubPersonService)
    }

    fn storages(&self) -> Arc<dyn StorageService> {
        Arc::new(StubStorageService)
    }

    fn inventory(&self) -> Arc<dyn InventoryService> {
        Arc::new(StubInventoryService)
    }

    fn temperature(&self) -> Arc<dyn TemperatureService> {
        Arc::new(StubTemperatureService)
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        Arc::new(StubPaymentService)
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        Arc::new(StubReportService)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    let state = AppState::from_container(&StubContainer, None);
    create_router(state)
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_returns_service_name() {
    let response = app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Cold Storage API");
}

#[tokio::test]
async fn test_health_is_healthy_without_database() {
    let response = app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_protected_route_requires_token() {
    let response = app()
        .oneshot(get("/api/inventory/inwards", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_authorization_header_is_rejected() {
    let request = Request::builder()
        .uri("/api/inventory/inwards")
        .header(header::AUTHORIZATION, "Token operator-token")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let response = app()
        .oneshot(get("/api/inventory/inwards", Some("forged-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_validates_phone_number() {
    let response = app()
        .oneshot(post_json(
            "/api/auth/signup",
            None,
            json!({"phone_number": "123", "name": "Ram"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_verify_otp_issues_token_pair() {
    let response = app()
        .oneshot(post_json(
            "/api/auth/verify-otp",
            None,
            json!({"phone_number": "9000000001", "code": "123456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["access"], "stub-access");
    assert_eq!(body["refresh"], "stub-refresh");
    assert!(body["user"]["id"].is_string());
}

#[tokio::test]
async fn test_verify_otp_rejects_wrong_code() {
    let response = app()
        .oneshot(post_json(
            "/api/auth/verify-otp",
            None,
            json!({"phone_number": "9000000001", "code": "999999"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "OTP_INVALID");
}

// =============================================================================
// Role Gates
// =============================================================================

#[tokio::test]
async fn test_unassigned_role_cannot_reach_inventory() {
    let response = app()
        .oneshot(get("/api/inventory/inwards", Some("norole-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_technician_cannot_record_inventory() {
    let response = app()
        .oneshot(get("/api/inventory/inwards", Some("technician-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_technician_can_list_temperature_logs() {
    let response = app()
        .oneshot(get("/api/temperature/logs", Some("technician-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_operator_can_list_inwards() {
    let response = app()
        .oneshot(get("/api/inventory/inwards", Some("operator-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["data"].is_array());
    assert!(body["meta"]["total"].is_number());
}

#[tokio::test]
async fn test_operator_cannot_view_payment_requests() {
    let response = app()
        .oneshot(get("/api/payments/requests", Some("operator-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manager_can_view_payment_requests() {
    let response = app()
        .oneshot(get("/api/payments/requests", Some("manager-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_manager_cannot_list_users() {
    let response = app()
        .oneshot(get("/api/users", Some("manager-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_can_list_users() {
    let response = app()
        .oneshot(get("/api/users", Some("admin-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_owner_dashboard_requires_admin() {
    let forbidden = app()
        .oneshot(get("/api/inventory/owner-dashboard", Some("manager-token")))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let allowed = app()
        .oneshot(get("/api/inventory/owner-dashboard", Some("owner-token")))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_only_requires_authentication() {
    let response = app()
        .oneshot(get("/api/dashboard", Some("norole-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["storage"]["total_capacity"], "500");
}

#[tokio::test]
async fn test_ledger_requires_manager() {
    let response = app()
        .oneshot(get("/api/ledger", Some("operator-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_room_management_requires_manager() {
    let body = json!({
        "name": "Chamber 2",
        "min_temperature": "2.0",
        "max_temperature": "8.0"
    });

    let forbidden = app()
        .oneshot(post_json(
            "/api/temperature/rooms",
            Some("technician-token"),
            body.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let created = app()
        .oneshot(post_json(
            "/api/temperature/rooms",
            Some("manager-token"),
            body,
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
}

// =============================================================================
// Inventory Flow
// =============================================================================

#[tokio::test]
async fn test_dispatch_overdraw_returns_insufficient_stock() {
    let response = app()
        .oneshot(post_json(
            "/api/inventory/outwards",
            Some("operator-token"),
            json!({
                "inward_entry_id": Uuid::new_v4(),
                "quantity": "40",
                "packaging_type": "bori"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INSUFFICIENT_STOCK");
    assert_eq!(body["error"]["message"], "Insufficient stock. Remaining: 25.5");
}

#[tokio::test]
async fn test_dispatch_within_stock_succeeds() {
    let response = app()
        .oneshot(post_json(
            "/api/inventory/outwards",
            Some("operator-token"),
            json!({
                "inward_entry_id": Uuid::new_v4(),
                "quantity": "10",
                "packaging_type": "crate"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(body["receipt_number"].as_str().unwrap().starts_with("RCP-"));
    assert_eq!(body["payment_status"], "pending");
}

#[tokio::test]
async fn test_receipt_endpoint_returns_receipt_number() {
    let path = format!("/api/inventory/outwards/{}/receipt", Uuid::new_v4());
    let response = app()
        .oneshot(get(&path, Some("operator-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["receipt_number"].as_str().unwrap().starts_with("RCP-"));
}

#[tokio::test]
async fn test_trigger_payment_returns_created_request() {
    let path = format!("/api/inventory/outwards/{}/trigger-payment", Uuid::new_v4());
    let response = app()
        .oneshot(post_json(
            &path,
            Some("operator-token"),
            json!({"method": "upi"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "requested");
    assert_eq!(body["method"], "upi");
    assert_eq!(body["payload"]["mock"], true);
}
