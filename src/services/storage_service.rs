//! Cold storage facility management service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ColdStorageResponse;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::infra::repositories::{ColdStorageUpdate, NewColdStorage};
use crate::types::{Paginated, PaginationParams};

/// Cold storage service trait for dependency injection.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Fetch one facility
    async fn get_storage(&self, id: Uuid) -> AppResult<ColdStorageResponse>;

    /// Register a facility; duplicate codes are rejected
    async fn create_storage(&self, new: NewColdStorage) -> AppResult<ColdStorageResponse>;

    /// Update facility fields
    async fn update_storage(
        &self,
        id: Uuid,
        update: ColdStorageUpdate,
    ) -> AppResult<ColdStorageResponse>;

    /// List facilities
    async fn list_storages(
        &self,
        params: PaginationParams,
    ) -> AppResult<Paginated<ColdStorageResponse>>;
}

/// Concrete implementation of StorageService using Unit of Work.
pub struct StorageManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StorageManager<U> {
    /// Create new storage service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StorageService for StorageManager<U> {
    async fn get_storage(&self, id: Uuid) -> AppResult<ColdStorageResponse> {
        let storage = self
            .uow
            .cold_storages()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        Ok(ColdStorageResponse::from(storage))
    }

    async fn create_storage(&self, new: NewColdStorage) -> AppResult<ColdStorageResponse> {
        if self
            .uow
            .cold_storages()
            .find_by_code(&new.code)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Cold storage"));
        }

        // The owner must exist before a facility can reference them
        self.uow
            .users()
            .find_by_id(new.owner_id)
            .await?
            .ok_or(AppError::validation("owner does not exist"))?;

        let storage = self.uow.cold_storages().create(new).await?;
        Ok(ColdStorageResponse::from(storage))
    }

    async fn update_storage(
        &self,
        id: Uuid,
        update: ColdStorageUpdate,
    ) -> AppResult<ColdStorageResponse> {
        let storage = self.uow.cold_storages().update(id, update).await?;
        Ok(ColdStorageResponse::from(storage))
    }

    async fn list_storages(
        &self,
        params: PaginationParams,
    ) -> AppResult<Paginated<ColdStorageResponse>> {
        let (storages, total) = self.uow.cold_storages().list(&params).await?;
        let data = storages.into_iter().map(ColdStorageResponse::from).collect();
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }
}
