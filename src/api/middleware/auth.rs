//! JWT authentication middleware and role guards.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated user extracted from JWT token.
///
/// `role` is `None` for users who have not been assigned one yet; such
/// users pass authentication but fail every role guard.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub phone_number: String,
    pub role: Option<UserRole>,
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        phone_number: claims.phone,
        role: claims.role.as_deref().and_then(UserRole::parse),
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require operator-level access (operator, manager, admin, owner).
pub fn require_operator(user: &CurrentUser) -> Result<(), AppError> {
    match user.role {
        Some(role) if role.is_operator_or_higher() => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

/// Require temperature-recording access (operator-level or technician).
pub fn require_temperature_access(user: &CurrentUser) -> Result<(), AppError> {
    match user.role {
        Some(role) if role.can_record_temperature() => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

/// Require manager or higher (manager, admin, owner).
pub fn require_manager(user: &CurrentUser) -> Result<(), AppError> {
    match user.role {
        Some(role) if role.is_manager_or_higher() => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

/// Require admin or owner.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    match user.role {
        Some(role) if role.is_admin_or_owner() => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Option<UserRole>) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            phone_number: "9000000001".to_string(),
            role,
        }
    }

    #[test]
    fn test_unassigned_role_fails_every_guard() {
        let user = user_with(None);
        assert!(require_operator(&user).is_err());
        assert!(require_temperature_access(&user).is_err());
        assert!(require_manager(&user).is_err());
        assert!(require_admin(&user).is_err());
    }

    #[test]
    fn test_technician_only_passes_temperature_guard() {
        let user = user_with(Some(UserRole::Technician));
        assert!(require_operator(&user).is_err());
        assert!(require_temperature_access(&user).is_ok());
        assert!(require_manager(&user).is_err());
    }

    #[test]
    fn test_owner_passes_all_guards() {
        let user = user_with(Some(UserRole::Owner));
        assert!(require_operator(&user).is_ok());
        assert!(require_temperature_access(&user).is_ok());
        assert!(require_manager(&user).is_ok());
        assert!(require_admin(&user).is_ok());
    }
}
