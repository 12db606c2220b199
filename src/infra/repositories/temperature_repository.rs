//! Temperature monitoring repository: rooms, logs, and alerts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::storage_room::{self, Entity as RoomEntity};
use super::entities::temperature_alert::{self, Entity as AlertEntity};
use super::entities::temperature_log::{self, Entity as LogEntity};
use crate::domain::{AlertStatus, StorageRoom, TemperatureAlert, TemperatureLog};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Temperature repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TemperatureRepository: Send + Sync {
    /// Register a monitored room
    async fn create_room(
        &self,
        cold_storage_id: Option<Uuid>,
        name: String,
        min_temperature: Decimal,
        max_temperature: Decimal,
    ) -> AppResult<StorageRoom>;

    /// Find room by ID
    async fn find_room(&self, id: Uuid) -> AppResult<Option<StorageRoom>>;

    /// List rooms, active first by name
    async fn list_rooms(&self) -> AppResult<Vec<StorageRoom>>;

    /// Update room thresholds and status
    async fn update_room(
        &self,
        id: Uuid,
        name: Option<String>,
        min_temperature: Option<Decimal>,
        max_temperature: Option<Decimal>,
        is_active: Option<bool>,
    ) -> AppResult<StorageRoom>;

    /// Record a temperature reading
    async fn create_log(
        &self,
        storage_room_id: Option<Uuid>,
        logged_at: DateTime<Utc>,
        temperature: Decimal,
        created_by: Uuid,
    ) -> AppResult<TemperatureLog>;

    /// Find reading by ID
    async fn find_log(&self, id: Uuid) -> AppResult<Option<TemperatureLog>>;

    /// List readings newest first, optionally scoped to one room
    async fn list_logs(
        &self,
        storage_room_id: Option<Uuid>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<TemperatureLog>, u64)>;

    /// Correct a reading's timestamp or value
    async fn update_log(
        &self,
        id: Uuid,
        logged_at: Option<DateTime<Utc>>,
        temperature: Option<Decimal>,
    ) -> AppResult<TemperatureLog>;

    /// Raise an alert for an out-of-range reading
    async fn create_alert(
        &self,
        storage_room_id: Uuid,
        temperature_log_id: Option<Uuid>,
        temperature: Decimal,
        message: String,
    ) -> AppResult<TemperatureAlert>;

    /// Find alert by ID
    async fn find_alert(&self, id: Uuid) -> AppResult<Option<TemperatureAlert>>;

    /// List alerts newest first, optionally filtered by status
    async fn list_alerts(
        &self,
        status: Option<AlertStatus>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<TemperatureAlert>, u64)>;

    /// Move an alert through its lifecycle
    async fn update_alert_status(
        &self,
        id: Uuid,
        status: AlertStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> AppResult<TemperatureAlert>;

    /// Count alerts still active
    async fn active_alert_count(&self) -> AppResult<u64>;
}

/// Concrete implementation of TemperatureRepository
pub struct TemperatureStore {
    db: DatabaseConnection,
}

impl TemperatureStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TemperatureRepository for TemperatureStore {
    async fn create_room(
        &self,
        cold_storage_id: Option<Uuid>,
        name: String,
        min_temperature: Decimal,
        max_temperature: Decimal,
    ) -> AppResult<StorageRoom> {
        let now = chrono::Utc::now();
        let active_model = storage_room::ActiveModel {
            id: Set(Uuid::new_v4()),
            cold_storage_id: Set(cold_storage_id),
            name: Set(name),
            min_temperature: Set(min_temperature),
            max_temperature: Set(max_temperature),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(StorageRoom::from(model))
    }

    async fn find_room(&self, id: Uuid) -> AppResult<Option<StorageRoom>> {
        let result = RoomEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StorageRoom::from))
    }

    async fn list_rooms(&self) -> AppResult<Vec<StorageRoom>> {
        let models = RoomEntity::find()
            .order_by_desc(storage_room::Column::IsActive)
            .order_by_asc(storage_room::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(StorageRoom::from).collect())
    }

    async fn update_room(
        &self,
        id: Uuid,
        name: Option<String>,
        min_temperature: Option<Decimal>,
        max_temperature: Option<Decimal>,
        is_active: Option<bool>,
    ) -> AppResult<StorageRoom> {
        let existing = RoomEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: storage_room::ActiveModel = existing.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(min) = min_temperature {
            active.min_temperature = Set(min);
        }
        if let Some(max) = max_temperature {
            active.max_temperature = Set(max);
        }
        if let Some(is_active) = is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(StorageRoom::from(model))
    }

    async fn create_log(
        &self,
        storage_room_id: Option<Uuid>,
        logged_at: DateTime<Utc>,
        temperature: Decimal,
        created_by: Uuid,
    ) -> AppResult<TemperatureLog> {
        let now = chrono::Utc::now();
        let active_model = temperature_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            storage_room_id: Set(storage_room_id),
            logged_at: Set(logged_at),
            temperature: Set(temperature),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(TemperatureLog::from(model))
    }

    async fn find_log(&self, id: Uuid) -> AppResult<Option<TemperatureLog>> {
        let result = LogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(TemperatureLog::from))
    }

    async fn list_logs(
        &self,
        storage_room_id: Option<Uuid>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<TemperatureLog>, u64)> {
        let mut query = LogEntity::find().order_by_desc(temperature_log::Column::LoggedAt);

        if let Some(room_id) = storage_room_id {
            query = query.filter(temperature_log::Column::StorageRoomId.eq(room_id));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(TemperatureLog::from).collect(), total))
    }

    async fn update_log(
        &self,
        id: Uuid,
        logged_at: Option<DateTime<Utc>>,
        temperature: Option<Decimal>,
    ) -> AppResult<TemperatureLog> {
        let existing = LogEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: temperature_log::ActiveModel = existing.into();

        if let Some(logged_at) = logged_at {
            active.logged_at = Set(logged_at);
        }
        if let Some(temperature) = temperature {
            active.temperature = Set(temperature);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(TemperatureLog::from(model))
    }

    async fn create_alert(
        &self,
        storage_room_id: Uuid,
        temperature_log_id: Option<Uuid>,
        temperature: Decimal,
        message: String,
    ) -> AppResult<TemperatureAlert> {
        let active_model = temperature_alert::ActiveModel {
            id: Set(Uuid::new_v4()),
            storage_room_id: Set(storage_room_id),
            temperature_log_id: Set(temperature_log_id),
            temperature: Set(temperature),
            message: Set(message),
            status: Set(AlertStatus::Active.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            resolved_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(TemperatureAlert::from(model))
    }

    async fn find_alert(&self, id: Uuid) -> AppResult<Option<TemperatureAlert>> {
        let result = AlertEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(TemperatureAlert::from))
    }

    async fn list_alerts(
        &self,
        status: Option<AlertStatus>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<TemperatureAlert>, u64)> {
        let mut query = AlertEntity::find().order_by_desc(temperature_alert::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(temperature_alert::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((
            models.into_iter().map(TemperatureAlert::from).collect(),
            total,
        ))
    }

    async fn update_alert_status(
        &self,
        id: Uuid,
        status: AlertStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> AppResult<TemperatureAlert> {
        let existing = AlertEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: temperature_alert::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.resolved_at = Set(resolved_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(TemperatureAlert::from(model))
    }

    async fn active_alert_count(&self) -> AppResult<u64> {
        AlertEntity::find()
            .filter(temperature_alert::Column::Status.eq(AlertStatus::Active.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
