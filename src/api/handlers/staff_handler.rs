//! Staff management handlers (manager or higher).
//!
//! Staff are users holding one of the operational roles: operator,
//! technician, or manager.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::{PreferredLanguage, StaffMemberResponse, UserRole};
use crate::errors::AppResult;

/// Staff creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStaffRequest {
    #[validate(length(min = 10, max = 15, message = "Phone number must be 10-15 digits"))]
    #[schema(example = "9000000003")]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Must be operator, technician, or manager
    #[schema(example = "operator")]
    pub role: UserRole,
    pub preferred_language: Option<PreferredLanguage>,
}

/// Staff update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

/// Staff role change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStaffRoleRequest {
    #[schema(example = "technician")]
    pub role: UserRole,
}

/// Create staff routes
pub fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route("/:id", patch(update_staff).delete(delete_staff))
        .route("/:id/toggle-status", post(toggle_staff_status))
        .route("/:id/update-role", post(update_staff_role))
}

/// List staff members
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Staff members", body = Vec<StaffMemberResponse>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_staff(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StaffMemberResponse>>> {
    require_manager(&current_user)?;
    let staff = state.user_service.list_staff().await?;
    Ok(Json(staff))
}

/// Register a staff member
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff member created", body = StaffMemberResponse),
        (status = 400, description = "Not a staff role"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Phone number already registered")
    )
)]
pub async fn create_staff(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStaffRequest>,
) -> AppResult<(StatusCode, Json<StaffMemberResponse>)> {
    require_manager(&current_user)?;

    let staff = state
        .user_service
        .create_staff(
            payload.phone_number,
            payload.name,
            payload.role,
            payload.preferred_language,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(staff)))
}

/// Update a staff member's name or role
#[utoipa::path(
    patch,
    path = "/api/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    request_body = UpdateStaffRequest,
    responses(
        (status = 200, description = "Staff member updated", body = StaffMemberResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn update_staff(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStaffRequest>,
) -> AppResult<Json<StaffMemberResponse>> {
    require_manager(&current_user)?;

    let staff = state
        .user_service
        .update_staff(id, payload.name, payload.role)
        .await?;

    Ok(Json(staff))
}

/// Remove a staff member
#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    responses(
        (status = 204, description = "Staff member removed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn delete_staff(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_manager(&current_user)?;
    state.user_service.delete_staff(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a staff member's active flag
#[utoipa::path(
    post,
    path = "/api/staff/{id}/toggle-status",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    responses(
        (status = 200, description = "Status toggled", body = StaffMemberResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn toggle_staff_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StaffMemberResponse>> {
    require_manager(&current_user)?;
    let staff = state.user_service.toggle_staff_status(id).await?;
    Ok(Json(staff))
}

/// Change a staff member's role
#[utoipa::path(
    post,
    path = "/api/staff/{id}/update-role",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    request_body = UpdateStaffRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = StaffMemberResponse),
        (status = 400, description = "Not a staff role"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn update_staff_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStaffRoleRequest>,
) -> AppResult<Json<StaffMemberResponse>> {
    require_manager(&current_user)?;
    let staff = state.user_service.update_staff_role(id, payload.role).await?;
    Ok(Json(staff))
}
