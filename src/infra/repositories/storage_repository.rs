//! Cold storage facility repository implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::cold_storage::{self, ActiveModel, Entity as ColdStorageEntity};
use crate::domain::ColdStorage;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields accepted when registering a new facility.
#[derive(Debug, Clone)]
pub struct NewColdStorage {
    pub name: String,
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub total_capacity: Decimal,
    pub owner_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub contact_phone: String,
    pub contact_email: String,
}

/// Partial update for a facility; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ColdStorageUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub total_capacity: Option<Decimal>,
    pub manager_id: Option<Option<Uuid>>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(FromQueryResult)]
struct CapacitySum {
    total: Option<Decimal>,
}

/// Cold storage repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ColdStorageRepository: Send + Sync {
    /// Find facility by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ColdStorage>>;

    /// Find facility by unique code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ColdStorage>>;

    /// Register a new facility
    async fn create(&self, new: NewColdStorage) -> AppResult<ColdStorage>;

    /// Update facility fields
    async fn update(&self, id: Uuid, update: ColdStorageUpdate) -> AppResult<ColdStorage>;

    /// List facilities with pagination
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<ColdStorage>, u64)>;

    /// All facilities, for the owner dashboard
    async fn list_all(&self) -> AppResult<Vec<ColdStorage>>;

    /// Sum of total capacity across active facilities, in MT
    async fn total_active_capacity(&self) -> AppResult<Option<Decimal>>;
}

/// Concrete implementation of ColdStorageRepository
pub struct ColdStorageStore {
    db: DatabaseConnection,
}

impl ColdStorageStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ColdStorageRepository for ColdStorageStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ColdStorage>> {
        let result = ColdStorageEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ColdStorage::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<ColdStorage>> {
        let result = ColdStorageEntity::find()
            .filter(cold_storage::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ColdStorage::from))
    }

    async fn create(&self, new: NewColdStorage) -> AppResult<ColdStorage> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            code: Set(new.code),
            address: Set(new.address),
            city: Set(new.city),
            state: Set(new.state),
            total_capacity: Set(new.total_capacity),
            owner_id: Set(new.owner_id),
            manager_id: Set(new.manager_id),
            contact_phone: Set(new.contact_phone),
            contact_email: Set(new.contact_email),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(ColdStorage::from(model))
    }

    async fn update(&self, id: Uuid, update: ColdStorageUpdate) -> AppResult<ColdStorage> {
        let existing = ColdStorageEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(address) = update.address {
            active.address = Set(address);
        }
        if let Some(city) = update.city {
            active.city = Set(city);
        }
        if let Some(state) = update.state {
            active.state = Set(state);
        }
        if let Some(capacity) = update.total_capacity {
            active.total_capacity = Set(capacity);
        }
        if let Some(manager_id) = update.manager_id {
            active.manager_id = Set(manager_id);
        }
        if let Some(phone) = update.contact_phone {
            active.contact_phone = Set(phone);
        }
        if let Some(email) = update.contact_email {
            active.contact_email = Set(email);
        }
        if let Some(is_active) = update.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(ColdStorage::from(model))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<ColdStorage>, u64)> {
        let paginator = ColdStorageEntity::find()
            .order_by_asc(cold_storage::Column::Name)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(ColdStorage::from).collect(), total))
    }

    async fn list_all(&self) -> AppResult<Vec<ColdStorage>> {
        let models = ColdStorageEntity::find()
            .order_by_asc(cold_storage::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ColdStorage::from).collect())
    }

    async fn total_active_capacity(&self) -> AppResult<Option<Decimal>> {
        let row = ColdStorageEntity::find()
            .select_only()
            .column_as(cold_storage::Column::TotalCapacity.sum(), "total")
            .filter(cold_storage::Column::IsActive.eq(true))
            .into_model::<CapacitySum>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.and_then(|r| r.total))
    }
}
