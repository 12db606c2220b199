//! HTTP middleware.

mod auth;

pub use auth::{
    auth_middleware, require_admin, require_manager, require_operator, require_temperature_access,
    CurrentUser,
};
