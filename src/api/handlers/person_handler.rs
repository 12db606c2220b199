//! Farmer/vendor directory handlers (operator or higher).

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_operator, CurrentUser};
use crate::api::AppState;
use crate::domain::{PersonResponse, PersonType};
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, PaginationParams};

/// Person creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePersonRequest {
    #[schema(example = "farmer")]
    pub person_type: PersonType,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ram Kumar")]
    pub name: String,
    #[validate(length(min = 10, max = 15, message = "Mobile number must be 10-15 digits"))]
    #[schema(example = "9111111111")]
    pub mobile_number: String,
    pub address: String,
}

/// Person update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePersonRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 10, max = 15, message = "Mobile number must be 10-15 digits"))]
    pub mobile_number: Option<String>,
    pub address: Option<String>,
    pub person_type: Option<PersonType>,
}

/// Person listing filters
#[derive(Debug, Deserialize)]
pub struct ListPersonsQuery {
    /// Matches name or mobile number
    pub search: Option<String>,
    pub person_type: Option<PersonType>,
}

/// Mobile lookup query
#[derive(Debug, Deserialize)]
pub struct ByMobileQuery {
    pub mobile_number: Option<String>,
}

/// Create person routes
pub fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_persons).post(create_person))
        .route("/by-mobile", get(get_by_mobile))
        .route("/:id", get(get_person).patch(update_person))
}

/// List persons with optional search and type filter
#[utoipa::path(
    get,
    path = "/api/inventory/persons",
    tag = "Persons",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Matches name or mobile number"),
        ("person_type" = Option<String>, Query, description = "farmer or vendor")
    ),
    responses(
        (status = 200, description = "Paginated list of persons"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_persons(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(filter): Query<ListPersonsQuery>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<PersonResponse>>> {
    require_operator(&current_user)?;

    let persons = state
        .person_service
        .list_persons(filter.search, filter.person_type, params)
        .await?;

    Ok(Json(persons))
}

/// Register a farmer or vendor
#[utoipa::path(
    post,
    path = "/api/inventory/persons",
    tag = "Persons",
    security(("bearer_auth" = [])),
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResponse),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Mobile number already registered")
    )
)]
pub async fn create_person(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePersonRequest>,
) -> AppResult<(StatusCode, Json<PersonResponse>)> {
    require_operator(&current_user)?;

    let person = state
        .person_service
        .create_person(
            payload.person_type,
            payload.name,
            payload.mobile_number,
            payload.address,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(person)))
}

/// Look up a person by exact mobile number
#[utoipa::path(
    get,
    path = "/api/inventory/persons/by-mobile",
    tag = "Persons",
    security(("bearer_auth" = [])),
    params(("mobile_number" = String, Query, description = "Exact mobile number")),
    responses(
        (status = 200, description = "Person found", body = PersonResponse),
        (status = 400, description = "mobile_number parameter missing"),
        (status = 404, description = "No person with this mobile number")
    )
)]
pub async fn get_by_mobile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ByMobileQuery>,
) -> AppResult<Json<PersonResponse>> {
    require_operator(&current_user)?;

    let mobile = query
        .mobile_number
        .filter(|m| !m.is_empty())
        .ok_or(AppError::BadRequest(
            "mobile_number query parameter is required".to_string(),
        ))?;

    let person = state.person_service.get_by_mobile(&mobile).await?;
    Ok(Json(person))
}

/// Fetch one person
#[utoipa::path(
    get,
    path = "/api/inventory/persons/{id}",
    tag = "Persons",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person profile", body = PersonResponse),
        (status = 404, description = "Person not found")
    )
)]
pub async fn get_person(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PersonResponse>> {
    require_operator(&current_user)?;
    let person = state.person_service.get_person(id).await?;
    Ok(Json(person))
}

/// Update a person's details
#[utoipa::path(
    patch,
    path = "/api/inventory/persons/{id}",
    tag = "Persons",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Person ID")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResponse),
        (status = 404, description = "Person not found"),
        (status = 409, description = "Mobile number already registered")
    )
)]
pub async fn update_person(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePersonRequest>,
) -> AppResult<Json<PersonResponse>> {
    require_operator(&current_user)?;

    let person = state
        .person_service
        .update_person(
            id,
            payload.name,
            payload.mobile_number,
            payload.address,
            payload.person_type,
        )
        .await?;

    Ok(Json(person))
}
