//! Payment request handlers (read-only, manager or higher).

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{require_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::{PaymentRequestResponse, PaymentRequestStatus};
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams};

/// Payment request listing filter
#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    pub status: Option<PaymentRequestStatus>,
}

/// Create payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests))
        .route("/requests/:id", get(get_request))
}

/// List payment requests, optionally by status
#[utoipa::path(
    get,
    path = "/api/payments/requests",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("status" = Option<String>, Query, description = "requested, paid, or failed")),
    responses(
        (status = 200, description = "Paginated list of payment requests"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_requests(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListRequestsQuery>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<PaymentRequestResponse>>> {
    require_manager(&current_user)?;
    let requests = state.payment_service.list_requests(query.status, params).await?;
    Ok(Json(requests))
}

/// Fetch one payment request
#[utoipa::path(
    get,
    path = "/api/payments/requests/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Payment request ID")),
    responses(
        (status = 200, description = "Payment request", body = PaymentRequestResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentRequestResponse>> {
    require_manager(&current_user)?;
    let request = state.payment_service.get_request(id).await?;
    Ok(Json(request))
}
