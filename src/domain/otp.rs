//! Phone OTP entity and the hashed-code value object.
//!
//! OTP codes are never stored in plain text; only an Argon2 hash is
//! persisted, mirroring password storage.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::config::OTP_CODE_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hashed OTP code value object.
#[derive(Clone)]
pub struct OtpCode {
    hash: String,
}

// Keep the hash out of debug output
impl std::fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpCode")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl OtpCode {
    /// Hash a plain-text code for storage.
    pub fn new(plain_code: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_code.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("OTP hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Rebuild from a stored hash.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain-text code against this hash.
    pub fn verify(&self, plain_code: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain_code.as_bytes(), &parsed)
            .is_ok()
    }

    /// Generate a random numeric code of the configured length.
    pub fn generate_plain() -> String {
        let mut rng = rand::thread_rng();
        (0..OTP_CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

/// A stored one-time password tied to a phone number.
#[derive(Debug, Clone)]
pub struct PhoneOtp {
    pub id: Uuid,
    pub phone_number: String,
    pub code_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl PhoneOtp {
    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Verify a code: fails if already used, expired, or not matching.
    pub fn verify(&self, code: &str, now: DateTime<Utc>) -> bool {
        if self.is_used() || self.is_expired(now) {
            return false;
        }
        OtpCode::from_hash(self.code_hash.clone()).verify(code)
    }

    /// Compute the expiry timestamp for a new OTP.
    pub fn expiry_from(now: DateTime<Utc>, ttl_seconds: i64) -> DateTime<Utc> {
        now + Duration::seconds(ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otp_with(code: &str, expires_in_secs: i64, used: bool) -> PhoneOtp {
        let now = Utc::now();
        PhoneOtp {
            id: Uuid::new_v4(),
            phone_number: "9000000001".to_string(),
            code_hash: OtpCode::new(code).unwrap().into_string(),
            created_at: now,
            expires_at: now + Duration::seconds(expires_in_secs),
            used_at: used.then_some(now),
        }
    }

    #[test]
    fn test_generated_code_is_numeric() {
        let code = OtpCode::generate_plain();
        assert_eq!(code.len(), OTP_CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_verify_correct_code() {
        let otp = otp_with("482913", 300, false);
        assert!(otp.verify("482913", Utc::now()));
    }

    #[test]
    fn test_verify_wrong_code_fails() {
        let otp = otp_with("482913", 300, false);
        assert!(!otp.verify("000000", Utc::now()));
    }

    #[test]
    fn test_verify_expired_code_fails() {
        let otp = otp_with("482913", -10, false);
        assert!(!otp.verify("482913", Utc::now()));
    }

    #[test]
    fn test_verify_used_code_fails() {
        let otp = otp_with("482913", 300, true);
        assert!(!otp.verify("482913", Utc::now()));
    }

    #[test]
    fn test_same_code_different_salts() {
        let a = OtpCode::new("123456").unwrap();
        let b = OtpCode::new("123456").unwrap();
        assert_ne!(a.as_str(), b.as_str());
        assert!(a.verify("123456"));
        assert!(b.verify("123456"));
    }
}
