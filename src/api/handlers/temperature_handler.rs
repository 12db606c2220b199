//! Temperature monitoring handlers: rooms, readings, and alerts.
//!
//! Technicians record and view readings alongside operator-level roles;
//! room management, reading corrections, and alert lifecycle changes
//! require manager or higher.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_manager, require_temperature_access, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    AlertStatus, StorageRoomResponse, TemperatureAlertResponse, TemperatureLogResponse,
};
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams};

/// Room registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    pub cold_storage_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Chamber 1")]
    pub name: String,
    #[schema(value_type = String, example = "2.00")]
    pub min_temperature: Decimal,
    #[schema(value_type = String, example = "8.00")]
    pub max_temperature: Decimal,
}

/// Room update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub min_temperature: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub max_temperature: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Reading creation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLogRequest {
    pub storage_room_id: Uuid,
    /// Defaults to now
    pub logged_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "4.25")]
    pub temperature: Decimal,
}

/// Reading correction request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLogRequest {
    pub logged_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub temperature: Option<Decimal>,
}

/// Reading listing filter
#[derive(Debug, Deserialize)]
pub struct ListLogsQuery {
    pub storage_room_id: Option<Uuid>,
}

/// Alert listing filter
#[derive(Debug, Deserialize)]
pub struct ListAlertsQuery {
    pub status: Option<AlertStatus>,
}

/// Create temperature routes
pub fn temperature_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/:id", patch(update_room))
        .route("/logs", get(list_logs).post(create_log))
        .route("/logs/:id", get(get_log).patch(update_log))
        .route("/alerts", get(list_alerts))
        .route("/alerts/:id/acknowledge", post(acknowledge_alert))
        .route("/alerts/:id/resolve", post(resolve_alert))
}

/// List monitored rooms
#[utoipa::path(
    get,
    path = "/api/temperature/rooms",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Monitored rooms", body = Vec<StorageRoomResponse>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_rooms(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StorageRoomResponse>>> {
    require_temperature_access(&current_user)?;
    let rooms = state.temperature_service.list_rooms().await?;
    Ok(Json(rooms))
}

/// Register a monitored room (manager or higher)
#[utoipa::path(
    post,
    path = "/api/temperature/rooms",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room registered", body = StorageRoomResponse),
        (status = 400, description = "Invalid threshold range"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_room(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<StorageRoomResponse>)> {
    require_manager(&current_user)?;

    let room = state
        .temperature_service
        .create_room(
            payload.cold_storage_id,
            payload.name,
            payload.min_temperature,
            payload.max_temperature,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(room)))
}

/// Update room thresholds or status (manager or higher)
#[utoipa::path(
    patch,
    path = "/api/temperature/rooms/{id}",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = StorageRoomResponse),
        (status = 400, description = "Invalid threshold range"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRoomRequest>,
) -> AppResult<Json<StorageRoomResponse>> {
    require_manager(&current_user)?;

    let room = state
        .temperature_service
        .update_room(
            id,
            payload.name,
            payload.min_temperature,
            payload.max_temperature,
            payload.is_active,
        )
        .await?;

    Ok(Json(room))
}

/// List readings newest first
#[utoipa::path(
    get,
    path = "/api/temperature/logs",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    params(("storage_room_id" = Option<Uuid>, Query, description = "Filter by room")),
    responses(
        (status = 200, description = "Paginated list of readings"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_logs(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListLogsQuery>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<TemperatureLogResponse>>> {
    require_temperature_access(&current_user)?;

    let logs = state
        .temperature_service
        .list_logs(query.storage_room_id, params)
        .await?;

    Ok(Json(logs))
}

/// Record a reading; out-of-range readings raise an alert
#[utoipa::path(
    post,
    path = "/api/temperature/logs",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    request_body = CreateLogRequest,
    responses(
        (status = 201, description = "Reading recorded", body = TemperatureLogResponse),
        (status = 400, description = "Room does not exist"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_log(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateLogRequest>,
) -> AppResult<(StatusCode, Json<TemperatureLogResponse>)> {
    require_temperature_access(&current_user)?;

    let log = state
        .temperature_service
        .create_log(
            payload.storage_room_id,
            payload.logged_at,
            payload.temperature,
            current_user.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(log)))
}

/// Fetch one reading
#[utoipa::path(
    get,
    path = "/api/temperature/logs/{id}",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Reading ID")),
    responses(
        (status = 200, description = "Reading", body = TemperatureLogResponse),
        (status = 404, description = "Reading not found")
    )
)]
pub async fn get_log(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TemperatureLogResponse>> {
    require_temperature_access(&current_user)?;
    let log = state.temperature_service.get_log(id).await?;
    Ok(Json(log))
}

/// Correct a reading (manager or higher)
#[utoipa::path(
    patch,
    path = "/api/temperature/logs/{id}",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Reading ID")),
    request_body = UpdateLogRequest,
    responses(
        (status = 200, description = "Reading updated", body = TemperatureLogResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Reading not found")
    )
)]
pub async fn update_log(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLogRequest>,
) -> AppResult<Json<TemperatureLogResponse>> {
    require_manager(&current_user)?;

    let log = state
        .temperature_service
        .update_log(id, payload.logged_at, payload.temperature)
        .await?;

    Ok(Json(log))
}

/// List alerts, optionally by status
#[utoipa::path(
    get,
    path = "/api/temperature/alerts",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    params(("status" = Option<String>, Query, description = "active, acknowledged, or resolved")),
    responses(
        (status = 200, description = "Paginated list of alerts"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_alerts(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListAlertsQuery>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<TemperatureAlertResponse>>> {
    require_temperature_access(&current_user)?;
    let alerts = state.temperature_service.list_alerts(query.status, params).await?;
    Ok(Json(alerts))
}

/// Acknowledge an active alert (manager or higher)
#[utoipa::path(
    post,
    path = "/api/temperature/alerts/{id}/acknowledge",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert acknowledged", body = TemperatureAlertResponse),
        (status = 400, description = "Alert is not active"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Alert not found")
    )
)]
pub async fn acknowledge_alert(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TemperatureAlertResponse>> {
    require_manager(&current_user)?;
    let alert = state.temperature_service.acknowledge_alert(id).await?;
    Ok(Json(alert))
}

/// Resolve an alert (manager or higher)
#[utoipa::path(
    post,
    path = "/api/temperature/alerts/{id}/resolve",
    tag = "Temperature",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert resolved", body = TemperatureAlertResponse),
        (status = 400, description = "Alert already resolved"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Alert not found")
    )
)]
pub async fn resolve_alert(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TemperatureAlertResponse>> {
    require_manager(&current_user)?;
    let alert = state.temperature_service.resolve_alert(id).await?;
    Ok(Json(alert))
}
