//! Authentication handlers: phone + OTP signup/login and token refresh.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::PreferredLanguage;
use crate::errors::AppResult;
use crate::services::{OtpIssuedResponse, TokenPairResponse};

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Login phone number
    #[validate(length(min = 10, max = 15, message = "Phone number must be 10-15 digits"))]
    #[schema(example = "9000000001")]
    pub phone_number: String,
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ram Kumar")]
    pub name: String,
    /// Interface language (`en` or `hi`)
    pub preferred_language: Option<PreferredLanguage>,
}

/// OTP request for an existing user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RequestOtpRequest {
    #[validate(length(min = 10, max = 15, message = "Phone number must be 10-15 digits"))]
    #[schema(example = "9000000001")]
    pub phone_number: String,
}

/// OTP verification request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 10, max = 15, message = "Phone number must be 10-15 digits"))]
    #[schema(example = "9000000001")]
    pub phone_number: String,
    /// One-time code from the SMS (or a bypass code in development)
    #[validate(length(min = 4, max = 6, message = "Code must be 4-6 digits"))]
    #[schema(example = "483920")]
    pub code: String,
}

/// Token refresh request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/request-otp", post(request_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/refresh", post(refresh))
}

/// Register a new user and send their first OTP
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered, OTP issued", body = OtpIssuedResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Phone number already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<OtpIssuedResponse>)> {
    let issued = state
        .auth_service
        .signup(payload.phone_number, payload.name, payload.preferred_language)
        .await?;

    Ok((StatusCode::CREATED, Json(issued)))
}

/// Issue an OTP for an existing user
#[utoipa::path(
    post,
    path = "/api/auth/request-otp",
    tag = "Authentication",
    request_body = RequestOtpRequest,
    responses(
        (status = 200, description = "OTP issued", body = OtpIssuedResponse),
        (status = 403, description = "Account deactivated"),
        (status = 404, description = "No user with this phone number")
    )
)]
pub async fn request_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RequestOtpRequest>,
) -> AppResult<Json<OtpIssuedResponse>> {
    let issued = state.auth_service.request_otp(payload.phone_number).await?;
    Ok(Json(issued))
}

/// Verify an OTP and receive an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    tag = "Authentication",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Authenticated", body = TokenPairResponse),
        (status = 400, description = "Invalid, expired, or reused OTP"),
        (status = 404, description = "No user with this phone number")
    )
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyOtpRequest>,
) -> AppResult<Json<TokenPairResponse>> {
    let pair = state
        .auth_service
        .verify_otp(payload.phone_number, payload.code)
        .await?;

    Ok(Json(pair))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenPairResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<TokenPairResponse>> {
    let pair = state.auth_service.refresh(payload.refresh_token).await?;
    Ok(Json(pair))
}
