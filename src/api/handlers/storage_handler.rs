//! Cold storage facility handlers.
//!
//! Reads are operator-level; create and update are admin/owner only.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, require_operator, CurrentUser};
use crate::api::AppState;
use crate::domain::ColdStorageResponse;
use crate::errors::AppResult;
use crate::infra::repositories::{ColdStorageUpdate, NewColdStorage};
use crate::types::{Paginated, PaginationParams};

/// Facility registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateColdStorageRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Hilltop Cold Store")]
    pub name: String,
    #[validate(length(min = 1, message = "Code is required"))]
    #[schema(example = "HCS-01")]
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Total capacity in MT
    #[schema(value_type = String, example = "500.00")]
    pub total_capacity: Decimal,
    pub owner_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub contact_phone: String,
    pub contact_email: String,
}

/// Facility update request.
///
/// `manager_id` distinguishes absent (unchanged) from null (cleared).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateColdStorageRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[schema(value_type = Option<String>)]
    pub total_capacity: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub manager_id: Option<Option<Uuid>>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: Option<bool>,
}

/// Deserialize a field where `null` and "absent" mean different things.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Create cold storage routes
pub fn storage_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_storages).post(create_storage))
        .route("/:id", get(get_storage).patch(update_storage))
}

/// List facilities
#[utoipa::path(
    get,
    path = "/api/inventory/cold-storages",
    tag = "Cold Storages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated list of facilities"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_storages(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ColdStorageResponse>>> {
    require_operator(&current_user)?;
    let storages = state.storage_service.list_storages(params).await?;
    Ok(Json(storages))
}

/// Register a facility (admin/owner only)
#[utoipa::path(
    post,
    path = "/api/inventory/cold-storages",
    tag = "Cold Storages",
    security(("bearer_auth" = [])),
    request_body = CreateColdStorageRequest,
    responses(
        (status = 201, description = "Facility created", body = ColdStorageResponse),
        (status = 400, description = "Owner does not exist"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Code already in use")
    )
)]
pub async fn create_storage(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateColdStorageRequest>,
) -> AppResult<(StatusCode, Json<ColdStorageResponse>)> {
    require_admin(&current_user)?;

    let storage = state
        .storage_service
        .create_storage(NewColdStorage {
            name: payload.name,
            code: payload.code,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            total_capacity: payload.total_capacity,
            owner_id: payload.owner_id,
            manager_id: payload.manager_id,
            contact_phone: payload.contact_phone,
            contact_email: payload.contact_email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(storage)))
}

/// Fetch one facility
#[utoipa::path(
    get,
    path = "/api/inventory/cold-storages/{id}",
    tag = "Cold Storages",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Cold storage ID")),
    responses(
        (status = 200, description = "Facility details", body = ColdStorageResponse),
        (status = 404, description = "Facility not found")
    )
)]
pub async fn get_storage(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ColdStorageResponse>> {
    require_operator(&current_user)?;
    let storage = state.storage_service.get_storage(id).await?;
    Ok(Json(storage))
}

/// Update a facility (admin/owner only)
#[utoipa::path(
    patch,
    path = "/api/inventory/cold-storages/{id}",
    tag = "Cold Storages",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Cold storage ID")),
    request_body = UpdateColdStorageRequest,
    responses(
        (status = 200, description = "Facility updated", body = ColdStorageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Facility not found")
    )
)]
pub async fn update_storage(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateColdStorageRequest>,
) -> AppResult<Json<ColdStorageResponse>> {
    require_admin(&current_user)?;

    let storage = state
        .storage_service
        .update_storage(
            id,
            ColdStorageUpdate {
                name: payload.name,
                address: payload.address,
                city: payload.city,
                state: payload.state,
                total_capacity: payload.total_capacity,
                manager_id: payload.manager_id,
                contact_phone: payload.contact_phone,
                contact_email: payload.contact_email,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(storage))
}
