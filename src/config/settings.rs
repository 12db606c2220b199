//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_HOURS, DEFAULT_DATABASE_URL, DEFAULT_OTP_TTL_SECONDS,
    DEFAULT_REFRESH_TOKEN_DAYS, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub access_token_hours: i64,
    pub refresh_token_days: i64,
    pub otp_ttl_seconds: i64,
    /// Echo generated OTP codes in API responses (development only)
    pub otp_debug_return_code: bool,
    /// Accept the fixed bypass codes without a stored OTP (development only)
    pub otp_allow_bypass: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_hours", &self.access_token_hours)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("otp_ttl_seconds", &self.otp_ttl_seconds)
            .field("otp_debug_return_code", &self.otp_debug_return_code)
            .field("otp_allow_bypass", &self.otp_allow_bypass)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        // Validate JWT secret length
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            access_token_hours: env::var("ACCESS_TOKEN_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TOKEN_HOURS),
            refresh_token_days: env::var("REFRESH_TOKEN_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_TOKEN_DAYS),
            otp_ttl_seconds: env::var("OTP_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_OTP_TTL_SECONDS),
            otp_debug_return_code: env::var("OTP_DEBUG_RETURN_CODE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(cfg!(debug_assertions)),
            otp_allow_bypass: env::var("OTP_ALLOW_BYPASS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(cfg!(debug_assertions)),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Build a config suitable for tests (fixed secret, bypass enabled).
    #[doc(hidden)]
    pub fn for_tests() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
            access_token_hours: DEFAULT_ACCESS_TOKEN_HOURS,
            refresh_token_days: DEFAULT_REFRESH_TOKEN_DAYS,
            otp_ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
            otp_debug_return_code: true,
            otp_allow_bypass: true,
        }
    }
}
