//! Phone OTP repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::phone_otp::{self, ActiveModel, Entity as PhoneOtpEntity};
use crate::domain::PhoneOtp;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// OTP repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Store a freshly issued code (hash only, never the plain code)
    async fn create(
        &self,
        phone_number: String,
        code_hash: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PhoneOtp>;

    /// Latest unused, unexpired code for a phone number. Consumed and
    /// expired rows are skipped so re-requesting a code never locks
    /// out a still-valid one.
    async fn latest_valid_for_phone(&self, phone_number: &str) -> AppResult<Option<PhoneOtp>>;

    /// Mark a code as consumed so it cannot be replayed
    async fn mark_used(&self, id: Uuid, used_at: DateTime<Utc>) -> AppResult<()>;
}

/// Concrete implementation of OtpRepository
pub struct OtpStore {
    db: DatabaseConnection,
}

impl OtpStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OtpRepository for OtpStore {
    async fn create(
        &self,
        phone_number: String,
        code_hash: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PhoneOtp> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            phone_number: Set(phone_number),
            code_hash: Set(code_hash),
            created_at: Set(now),
            expires_at: Set(expires_at),
            used_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(PhoneOtp::from(model))
    }

    async fn latest_valid_for_phone(&self, phone_number: &str) -> AppResult<Option<PhoneOtp>> {
        let result = PhoneOtpEntity::find()
            .filter(phone_otp::Column::PhoneNumber.eq(phone_number))
            .filter(phone_otp::Column::UsedAt.is_null())
            .filter(phone_otp::Column::ExpiresAt.gt(Utc::now()))
            .order_by_desc(phone_otp::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(PhoneOtp::from))
    }

    async fn mark_used(&self, id: Uuid, used_at: DateTime<Utc>) -> AppResult<()> {
        let otp = PhoneOtpEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = otp.into();
        active.used_at = Set(Some(used_at));
        active.update(&self.db).await.map_err(AppError::from)?;

        Ok(())
    }
}
