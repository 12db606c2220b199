//! Inventory handlers: intake, dispatch, stock, receipts, and payment
//! triggers (operator or higher).

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_operator, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    InwardEntryResponse, OutwardEntryResponse, PackagingType, PaymentMethod,
    PaymentRequestResponse, QualityGrade, StockItem,
};
use crate::errors::AppResult;
use crate::infra::repositories::InwardFilter;
use crate::services::{InwardInput, ReceiptResponse};
use crate::types::{Paginated, PaginationParams};

/// Intake request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInwardRequest {
    pub person_id: Uuid,
    pub cold_storage_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Crop name is required"))]
    #[schema(example = "Potato")]
    pub crop_name: String,
    pub crop_variety: String,
    pub size_grade: String,
    /// Quantity in MT, must be positive
    #[schema(value_type = String, example = "100.000")]
    pub quantity: Decimal,
    #[schema(example = "bori")]
    pub packaging_type: PackagingType,
    /// Defaults to grade A
    pub quality_grade: Option<QualityGrade>,
    pub rack_number: String,
    pub storage_room: String,
    pub expected_storage_duration_days: Option<i32>,
}

/// Dispatch request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOutwardRequest {
    pub inward_entry_id: Uuid,
    /// Quantity in MT; must not exceed the entry's remaining stock
    #[schema(value_type = String, example = "25.000")]
    pub quantity: Decimal,
    #[schema(example = "bori")]
    pub packaging_type: PackagingType,
}

/// Payment trigger request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TriggerPaymentRequest {
    #[schema(example = "upi")]
    pub method: PaymentMethod,
}

/// Intake listing filters
#[derive(Debug, Deserialize)]
pub struct ListInwardsQuery {
    pub person_id: Option<Uuid>,
    pub cold_storage_id: Option<Uuid>,
    /// Substring match on crop name
    pub crop: Option<String>,
}

/// Stock listing filters
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub person: Option<Uuid>,
    pub crop: Option<String>,
}

/// Dispatch listing filter
#[derive(Debug, Deserialize)]
pub struct ListOutwardsQuery {
    pub inward_entry_id: Option<Uuid>,
}

/// Create inventory routes
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/inwards", get(list_inwards).post(create_inward))
        .route("/inwards/stock", get(stock))
        .route("/inwards/:id", get(get_inward))
        .route("/outwards", get(list_outwards).post(create_outward))
        .route("/outwards/:id", get(get_outward))
        .route("/outwards/:id/receipt", get(get_receipt))
        .route("/outwards/:id/trigger-payment", post(trigger_payment))
}

/// List intakes with remaining quantities
#[utoipa::path(
    get,
    path = "/api/inventory/inwards",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(
        ("person_id" = Option<Uuid>, Query, description = "Filter by person"),
        ("cold_storage_id" = Option<Uuid>, Query, description = "Filter by facility"),
        ("crop" = Option<String>, Query, description = "Substring match on crop name")
    ),
    responses(
        (status = 200, description = "Paginated list of inward entries"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_inwards(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(filter): Query<ListInwardsQuery>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<InwardEntryResponse>>> {
    require_operator(&current_user)?;

    let entries = state
        .inventory_service
        .list_inwards(
            InwardFilter {
                person_id: filter.person_id,
                cold_storage_id: filter.cold_storage_id,
                crop_search: filter.crop,
            },
            params,
        )
        .await?;

    Ok(Json(entries))
}

/// Record an intake
#[utoipa::path(
    post,
    path = "/api/inventory/inwards",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    request_body = CreateInwardRequest,
    responses(
        (status = 201, description = "Intake recorded", body = InwardEntryResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_inward(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInwardRequest>,
) -> AppResult<(StatusCode, Json<InwardEntryResponse>)> {
    require_operator(&current_user)?;

    let entry = state
        .inventory_service
        .create_inward(
            InwardInput {
                person_id: payload.person_id,
                cold_storage_id: payload.cold_storage_id,
                crop_name: payload.crop_name,
                crop_variety: payload.crop_variety,
                size_grade: payload.size_grade,
                quantity: payload.quantity,
                packaging_type: payload.packaging_type,
                quality_grade: payload.quality_grade.unwrap_or_default(),
                rack_number: payload.rack_number,
                storage_room: payload.storage_room,
                expected_storage_duration_days: payload.expected_storage_duration_days,
            },
            current_user.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Entries that still hold stock
#[utoipa::path(
    get,
    path = "/api/inventory/inwards/stock",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(
        ("person" = Option<Uuid>, Query, description = "Filter by person"),
        ("crop" = Option<String>, Query, description = "Substring match on crop name")
    ),
    responses(
        (status = 200, description = "Entries with remaining quantity > 0", body = Vec<StockItem>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn stock(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> AppResult<Json<Vec<StockItem>>> {
    require_operator(&current_user)?;
    let items = state.inventory_service.stock(query.person, query.crop).await?;
    Ok(Json(items))
}

/// Fetch one intake with its remaining quantity
#[utoipa::path(
    get,
    path = "/api/inventory/inwards/{id}",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Inward entry ID")),
    responses(
        (status = 200, description = "Inward entry", body = InwardEntryResponse),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_inward(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InwardEntryResponse>> {
    require_operator(&current_user)?;
    let entry = state.inventory_service.get_inward(id).await?;
    Ok(Json(entry))
}

/// List dispatches, optionally scoped to one intake
#[utoipa::path(
    get,
    path = "/api/inventory/outwards",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("inward_entry_id" = Option<Uuid>, Query, description = "Filter by inward entry")),
    responses(
        (status = 200, description = "Paginated list of outward entries"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_outwards(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListOutwardsQuery>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<OutwardEntryResponse>>> {
    require_operator(&current_user)?;

    let entries = state
        .inventory_service
        .list_outwards(query.inward_entry_id, params)
        .await?;

    Ok(Json(entries))
}

/// Record a dispatch against an intake
#[utoipa::path(
    post,
    path = "/api/inventory/outwards",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    request_body = CreateOutwardRequest,
    responses(
        (status = 201, description = "Dispatch recorded", body = OutwardEntryResponse),
        (status = 400, description = "Insufficient stock or invalid quantity"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Inward entry not found")
    )
)]
pub async fn create_outward(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateOutwardRequest>,
) -> AppResult<(StatusCode, Json<OutwardEntryResponse>)> {
    require_operator(&current_user)?;

    let entry = state
        .inventory_service
        .create_outward(
            payload.inward_entry_id,
            payload.quantity,
            payload.packaging_type,
            current_user.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Fetch one dispatch
#[utoipa::path(
    get,
    path = "/api/inventory/outwards/{id}",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Outward entry ID")),
    responses(
        (status = 200, description = "Outward entry", body = OutwardEntryResponse),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_outward(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OutwardEntryResponse>> {
    require_operator(&current_user)?;
    let entry = state.inventory_service.get_outward(id).await?;
    Ok(Json(entry))
}

/// Receipt details for a dispatch
#[utoipa::path(
    get,
    path = "/api/inventory/outwards/{id}/receipt",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Outward entry ID")),
    responses(
        (status = 200, description = "Receipt details", body = ReceiptResponse),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_receipt(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReceiptResponse>> {
    require_operator(&current_user)?;
    let receipt = state.inventory_service.get_receipt(id).await?;
    Ok(Json(receipt))
}

/// Raise a mock payment request for a dispatch
#[utoipa::path(
    post,
    path = "/api/inventory/outwards/{id}/trigger-payment",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Outward entry ID")),
    request_body = TriggerPaymentRequest,
    responses(
        (status = 201, description = "Payment request raised", body = PaymentRequestResponse),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Payment request already exists")
    )
)]
pub async fn trigger_payment(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TriggerPaymentRequest>,
) -> AppResult<(StatusCode, Json<PaymentRequestResponse>)> {
    require_operator(&current_user)?;

    let request = state
        .inventory_service
        .trigger_payment(id, payload.method)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}
