//! Auth service unit tests: OTP issue/verify and token pairs.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use coldstore_api::config::Config;
use coldstore_api::domain::{OtpCode, PhoneOtp, UserRole};
use coldstore_api::errors::AppError;
use coldstore_api::infra::{MockOtpRepository, MockUserRepository};
use coldstore_api::services::{AuthService, Authenticator};

use common::{sample_user, TestUnitOfWork};

fn stored_otp(phone: &str, code: &str, expires_in_secs: i64) -> PhoneOtp {
    let now = Utc::now();
    PhoneOtp {
        id: Uuid::new_v4(),
        phone_number: phone.to_string(),
        code_hash: OtpCode::new(code).unwrap().into_string(),
        created_at: now,
        expires_at: now + Duration::seconds(expires_in_secs),
        used_at: None,
    }
}

fn authenticator(uow: TestUnitOfWork) -> Authenticator<TestUnitOfWork> {
    Authenticator::new(Arc::new(uow), Config::for_tests())
}

#[tokio::test]
async fn test_signup_rejects_duplicate_phone() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_phone()
        .returning(|_| Ok(Some(sample_user(None))));

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::default()
    });

    let result = service
        .signup("9000000001".to_string(), "Ram".to_string(), None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_signup_creates_user_and_issues_otp() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_phone().returning(|_| Ok(None));
    users
        .expect_create()
        .returning(|phone, name, lang| {
            let mut user = sample_user(None);
            user.phone_number = phone;
            user.name = name;
            user.preferred_language = lang;
            Ok(user)
        });

    let mut otps = MockOtpRepository::new();
    otps.expect_create()
        .times(1)
        .returning(|phone, hash, expires| {
            Ok(PhoneOtp {
                id: Uuid::new_v4(),
                phone_number: phone,
                code_hash: hash,
                created_at: Utc::now(),
                expires_at: expires,
                used_at: None,
            })
        });

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        otps: Arc::new(otps),
        ..TestUnitOfWork::default()
    });

    let issued = service
        .signup("9000000002".to_string(), "Ram".to_string(), None)
        .await
        .unwrap();

    assert_eq!(issued.detail, "OTP sent");
    // Test config echoes the plain code
    let code = issued.code.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_request_otp_rejects_inactive_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_phone().returning(|_| {
        let mut user = sample_user(Some(UserRole::Operator));
        user.is_active = false;
        Ok(Some(user))
    });

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::default()
    });

    let result = service.request_otp("9000000001".to_string()).await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_verify_otp_accepts_stored_code_and_marks_used() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_phone()
        .returning(|_| Ok(Some(sample_user(Some(UserRole::Operator)))));

    let mut otps = MockOtpRepository::new();
    otps.expect_latest_valid_for_phone()
        .returning(|phone| Ok(Some(stored_otp(phone, "482913", 300))));
    otps.expect_mark_used().times(1).returning(|_, _| Ok(()));

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        otps: Arc::new(otps),
        ..TestUnitOfWork::default()
    });

    let pair = service
        .verify_otp("9000000001".to_string(), "482913".to_string())
        .await
        .unwrap();

    assert!(!pair.access.is_empty());
    assert!(!pair.refresh.is_empty());
    assert_eq!(pair.user.role, Some(UserRole::Operator));
}

#[tokio::test]
async fn test_verify_otp_rejects_wrong_code() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_phone()
        .returning(|_| Ok(Some(sample_user(None))));

    let mut otps = MockOtpRepository::new();
    otps.expect_latest_valid_for_phone()
        .returning(|phone| Ok(Some(stored_otp(phone, "482913", 300))));

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        otps: Arc::new(otps),
        ..TestUnitOfWork::default()
    });

    let result = service
        .verify_otp("9000000001".to_string(), "999999".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidOtp));
}

#[tokio::test]
async fn test_verify_otp_rejects_expired_code() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_phone()
        .returning(|_| Ok(Some(sample_user(None))));

    let mut otps = MockOtpRepository::new();
    otps.expect_latest_valid_for_phone()
        .returning(|phone| Ok(Some(stored_otp(phone, "482913", -10))));

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        otps: Arc::new(otps),
        ..TestUnitOfWork::default()
    });

    let result = service
        .verify_otp("9000000001".to_string(), "482913".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidOtp));
}

#[tokio::test]
async fn test_verify_otp_accepts_valid_code_after_newer_one_was_consumed() {
    // The repository skips consumed and expired rows, so after a newer
    // code is used up the previous one stays verifiable until it
    // expires. mark_used must hit exactly the row that matched.
    let prior = stored_otp("9000000001", "482913", 300);
    let prior_id = prior.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_phone()
        .returning(|_| Ok(Some(sample_user(Some(UserRole::Operator)))));

    let mut otps = MockOtpRepository::new();
    otps.expect_latest_valid_for_phone()
        .returning(move |_| Ok(Some(prior.clone())));
    otps.expect_mark_used()
        .times(1)
        .withf(move |id, _| *id == prior_id)
        .returning(|_, _| Ok(()));

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        otps: Arc::new(otps),
        ..TestUnitOfWork::default()
    });

    let pair = service
        .verify_otp("9000000001".to_string(), "482913".to_string())
        .await
        .unwrap();

    assert!(!pair.access.is_empty());
}

#[tokio::test]
async fn test_verify_otp_accepts_bypass_code_without_stored_otp() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_phone()
        .returning(|_| Ok(Some(sample_user(Some(UserRole::Manager)))));

    // No OTP repository expectations: the bypass path never reads them
    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::default()
    });

    let pair = service
        .verify_otp("9000000001".to_string(), "123456".to_string())
        .await
        .unwrap();

    let claims = service.verify_token(&pair.access).unwrap();
    assert_eq!(claims.role.as_deref(), Some("manager"));
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_access_token_is_rejected_as_refresh_token() {
    let user = sample_user(Some(UserRole::Operator));
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    let lookup = user.clone();
    users
        .expect_find_by_phone()
        .returning(move |_| Ok(Some(lookup.clone())));
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));

    let service = authenticator(TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::default()
    });

    let pair = service
        .verify_otp("9000000001".to_string(), "123456".to_string())
        .await
        .unwrap();

    // Refresh token mints a new pair for the same user
    let rotated = service.refresh(pair.refresh.clone()).await.unwrap();
    assert_eq!(rotated.user.id, user_id);

    // Kind checks hold in both directions
    assert!(matches!(
        service.refresh(pair.access.clone()).await.unwrap_err(),
        AppError::Unauthorized
    ));
    assert!(matches!(
        service.verify_token(&pair.refresh).unwrap_err(),
        AppError::Unauthorized
    ));
}
