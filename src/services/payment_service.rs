//! Payment request read service.
//!
//! Requests are raised by the inventory trigger-payment flow; this
//! service only exposes them for review.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{PaymentRequestResponse, PaymentRequestStatus};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Payment service trait for dependency injection.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// List payment requests, optionally filtered by status
    async fn list_requests(
        &self,
        status: Option<PaymentRequestStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<PaymentRequestResponse>>;

    /// Fetch one payment request
    async fn get_request(&self, id: Uuid) -> AppResult<PaymentRequestResponse>;
}

/// Concrete implementation of PaymentService using Unit of Work.
pub struct PaymentDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PaymentDesk<U> {
    /// Create new payment service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PaymentService for PaymentDesk<U> {
    async fn list_requests(
        &self,
        status: Option<PaymentRequestStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<PaymentRequestResponse>> {
        let (requests, total) = self.uow.payments().list(status, &params).await?;

        let data = requests
            .into_iter()
            .map(PaymentRequestResponse::from)
            .collect();

        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn get_request(&self, id: Uuid) -> AppResult<PaymentRequestResponse> {
        let request = self
            .uow
            .payments()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        Ok(PaymentRequestResponse::from(request))
    }
}
