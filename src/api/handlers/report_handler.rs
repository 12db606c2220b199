//! Reporting handlers: dashboards and the movement ledger.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{require_admin, require_manager, CurrentUser};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{DashboardResponse, LedgerFilter, LedgerResponse, OwnerDashboardResponse};

/// Ledger filters
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub person: Option<Uuid>,
    pub crop: Option<String>,
}

/// Create report routes (dashboard and ledger)
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/ledger", get(ledger))
}

/// Main operations dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn dashboard(
    Extension(_current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardResponse>> {
    let dashboard = state.report_service.dashboard().await?;
    Ok(Json(dashboard))
}

/// Per-facility utilization (admin/owner only)
#[utoipa::path(
    get,
    path = "/api/inventory/owner-dashboard",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Per-facility utilization", body = OwnerDashboardResponse),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn owner_dashboard(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<OwnerDashboardResponse>> {
    require_admin(&current_user)?;
    let dashboard = state.report_service.owner_dashboard().await?;
    Ok(Json(dashboard))
}

/// Merged inward/outward movement journal (manager or higher)
#[utoipa::path(
    get,
    path = "/api/ledger",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(
        ("date_from" = Option<String>, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Inclusive end date (YYYY-MM-DD)"),
        ("person" = Option<Uuid>, Query, description = "Filter by person"),
        ("crop" = Option<String>, Query, description = "Substring match on crop name")
    ),
    responses(
        (status = 200, description = "Time-ordered movements with totals", body = LedgerResponse),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn ledger(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<LedgerResponse>> {
    require_manager(&current_user)?;

    let ledger = state
        .report_service
        .ledger(LedgerFilter {
            date_from: query.date_from,
            date_to: query.date_to,
            person_id: query.person,
            crop: query.crop,
        })
        .await?;

    Ok(Json(ledger))
}
