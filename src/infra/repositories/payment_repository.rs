//! Payment request repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::payment_request::{self, ActiveModel, Entity as PaymentRequestEntity};
use crate::domain::{PaymentRequest, PaymentRequestStatus};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Payment request repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Raise a payment request for an outward entry
    async fn create(
        &self,
        outward_entry_id: Uuid,
        method: String,
        payload: serde_json::Value,
    ) -> AppResult<PaymentRequest>;

    /// Find payment request by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PaymentRequest>>;

    /// Find the request raised for an outward entry, if any
    async fn find_by_outward(&self, outward_entry_id: Uuid) -> AppResult<Option<PaymentRequest>>;

    /// List requests newest first, optionally filtered by status
    async fn list(
        &self,
        status: Option<PaymentRequestStatus>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<PaymentRequest>, u64)>;

    /// Move a request through its lifecycle
    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentRequestStatus,
    ) -> AppResult<PaymentRequest>;
}

/// Concrete implementation of PaymentRepository
pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn create(
        &self,
        outward_entry_id: Uuid,
        method: String,
        payload: serde_json::Value,
    ) -> AppResult<PaymentRequest> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            outward_entry_id: Set(outward_entry_id),
            status: Set(PaymentRequestStatus::Requested.as_str().to_string()),
            method: Set(method),
            payload: Set(payload),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(PaymentRequest::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PaymentRequest>> {
        let result = PaymentRequestEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(PaymentRequest::from))
    }

    async fn find_by_outward(&self, outward_entry_id: Uuid) -> AppResult<Option<PaymentRequest>> {
        let result = PaymentRequestEntity::find()
            .filter(payment_request::Column::OutwardEntryId.eq(outward_entry_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(PaymentRequest::from))
    }

    async fn list(
        &self,
        status: Option<PaymentRequestStatus>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<PaymentRequest>, u64)> {
        let mut query =
            PaymentRequestEntity::find().order_by_desc(payment_request::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(payment_request::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(PaymentRequest::from).collect(), total))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PaymentRequestStatus,
    ) -> AppResult<PaymentRequest> {
        let existing = PaymentRequestEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(PaymentRequest::from(model))
    }
}
