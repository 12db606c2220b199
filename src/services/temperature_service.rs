//! Temperature monitoring service: rooms, readings, and alerts.
//!
//! Recording a reading outside the room's threshold range raises an
//! active alert; acknowledging and resolving move the alert through
//! its lifecycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    AlertStatus, StorageRoom, StorageRoomResponse, TemperatureAlertResponse,
    TemperatureLogResponse,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Temperature service trait for dependency injection.
#[async_trait]
pub trait TemperatureService: Send + Sync {
    /// Register a monitored room
    async fn create_room(
        &self,
        cold_storage_id: Option<Uuid>,
        name: String,
        min_temperature: Decimal,
        max_temperature: Decimal,
    ) -> AppResult<StorageRoomResponse>;

    /// List rooms
    async fn list_rooms(&self) -> AppResult<Vec<StorageRoomResponse>>;

    /// Update room thresholds or status
    async fn update_room(
        &self,
        id: Uuid,
        name: Option<String>,
        min_temperature: Option<Decimal>,
        max_temperature: Option<Decimal>,
        is_active: Option<bool>,
    ) -> AppResult<StorageRoomResponse>;

    /// Record a reading; out-of-range readings raise an alert
    async fn create_log(
        &self,
        storage_room_id: Uuid,
        logged_at: Option<DateTime<Utc>>,
        temperature: Decimal,
        created_by: Uuid,
    ) -> AppResult<TemperatureLogResponse>;

    /// Fetch one reading
    async fn get_log(&self, id: Uuid) -> AppResult<TemperatureLogResponse>;

    /// List readings newest first
    async fn list_logs(
        &self,
        storage_room_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<Paginated<TemperatureLogResponse>>;

    /// Correct a reading's timestamp or value
    async fn update_log(
        &self,
        id: Uuid,
        logged_at: Option<DateTime<Utc>>,
        temperature: Option<Decimal>,
    ) -> AppResult<TemperatureLogResponse>;

    /// List alerts, optionally by status
    async fn list_alerts(
        &self,
        status: Option<AlertStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<TemperatureAlertResponse>>;

    /// Mark an active alert as acknowledged
    async fn acknowledge_alert(&self, id: Uuid) -> AppResult<TemperatureAlertResponse>;

    /// Mark an alert as resolved
    async fn resolve_alert(&self, id: Uuid) -> AppResult<TemperatureAlertResponse>;
}

/// Validate that thresholds form a non-empty range
fn ensure_valid_range(min: Decimal, max: Decimal) -> AppResult<()> {
    if min >= max {
        return Err(AppError::validation(
            "min_temperature must be below max_temperature",
        ));
    }
    Ok(())
}

/// Alert message for a reading outside the room's range
fn out_of_range_message(room: &StorageRoom, temperature: Decimal) -> String {
    format!(
        "Temperature {}°C outside range {}°C to {}°C in {}",
        temperature, room.min_temperature, room.max_temperature, room.name
    )
}

/// Concrete implementation of TemperatureService using Unit of Work.
pub struct TemperatureMonitor<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TemperatureMonitor<U> {
    /// Create new temperature service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TemperatureService for TemperatureMonitor<U> {
    async fn create_room(
        &self,
        cold_storage_id: Option<Uuid>,
        name: String,
        min_temperature: Decimal,
        max_temperature: Decimal,
    ) -> AppResult<StorageRoomResponse> {
        ensure_valid_range(min_temperature, max_temperature)?;

        if let Some(storage_id) = cold_storage_id {
            self.uow
                .cold_storages()
                .find_by_id(storage_id)
                .await?
                .ok_or(AppError::validation("cold storage does not exist"))?;
        }

        let room = self
            .uow
            .temperature()
            .create_room(cold_storage_id, name, min_temperature, max_temperature)
            .await?;

        Ok(StorageRoomResponse::from(room))
    }

    async fn list_rooms(&self) -> AppResult<Vec<StorageRoomResponse>> {
        let rooms = self.uow.temperature().list_rooms().await?;
        Ok(rooms.into_iter().map(StorageRoomResponse::from).collect())
    }

    async fn update_room(
        &self,
        id: Uuid,
        name: Option<String>,
        min_temperature: Option<Decimal>,
        max_temperature: Option<Decimal>,
        is_active: Option<bool>,
    ) -> AppResult<StorageRoomResponse> {
        let existing = self
            .uow
            .temperature()
            .find_room(id)
            .await?
            .ok_or_not_found()?;

        let min = min_temperature.unwrap_or(existing.min_temperature);
        let max = max_temperature.unwrap_or(existing.max_temperature);
        ensure_valid_range(min, max)?;

        let room = self
            .uow
            .temperature()
            .update_room(id, name, min_temperature, max_temperature, is_active)
            .await?;

        Ok(StorageRoomResponse::from(room))
    }

    async fn create_log(
        &self,
        storage_room_id: Uuid,
        logged_at: Option<DateTime<Utc>>,
        temperature: Decimal,
        created_by: Uuid,
    ) -> AppResult<TemperatureLogResponse> {
        let room = self
            .uow
            .temperature()
            .find_room(storage_room_id)
            .await?
            .ok_or(AppError::validation("storage room does not exist"))?;

        let log = self
            .uow
            .temperature()
            .create_log(
                Some(storage_room_id),
                logged_at.unwrap_or_else(Utc::now),
                temperature,
                created_by,
            )
            .await?;

        if !room.is_within_range(temperature) {
            let alert = self
                .uow
                .temperature()
                .create_alert(
                    room.id,
                    Some(log.id),
                    temperature,
                    out_of_range_message(&room, temperature),
                )
                .await?;

            tracing::warn!(
                room = %room.name,
                temperature = %temperature,
                alert_id = %alert.id,
                "temperature out of range"
            );
        }

        Ok(TemperatureLogResponse::from(log))
    }

    async fn get_log(&self, id: Uuid) -> AppResult<TemperatureLogResponse> {
        let log = self
            .uow
            .temperature()
            .find_log(id)
            .await?
            .ok_or_not_found()?;

        Ok(TemperatureLogResponse::from(log))
    }

    async fn list_logs(
        &self,
        storage_room_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<Paginated<TemperatureLogResponse>> {
        let (logs, total) = self
            .uow
            .temperature()
            .list_logs(storage_room_id, &params)
            .await?;

        let data = logs.into_iter().map(TemperatureLogResponse::from).collect();
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn update_log(
        &self,
        id: Uuid,
        logged_at: Option<DateTime<Utc>>,
        temperature: Option<Decimal>,
    ) -> AppResult<TemperatureLogResponse> {
        self.uow
            .temperature()
            .find_log(id)
            .await?
            .ok_or_not_found()?;

        // Corrections do not re-run alert evaluation; alerts are raised
        // only when a reading is first recorded.
        let log = self
            .uow
            .temperature()
            .update_log(id, logged_at, temperature)
            .await?;

        Ok(TemperatureLogResponse::from(log))
    }

    async fn list_alerts(
        &self,
        status: Option<AlertStatus>,
        params: PaginationParams,
    ) -> AppResult<Paginated<TemperatureAlertResponse>> {
        let (alerts, total) = self.uow.temperature().list_alerts(status, &params).await?;

        let data = alerts
            .into_iter()
            .map(TemperatureAlertResponse::from)
            .collect();

        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn acknowledge_alert(&self, id: Uuid) -> AppResult<TemperatureAlertResponse> {
        let alert = self
            .uow
            .temperature()
            .find_alert(id)
            .await?
            .ok_or_not_found()?;

        if alert.status != AlertStatus::Active {
            return Err(AppError::validation("only active alerts can be acknowledged"));
        }

        let alert = self
            .uow
            .temperature()
            .update_alert_status(id, AlertStatus::Acknowledged, None)
            .await?;

        Ok(TemperatureAlertResponse::from(alert))
    }

    async fn resolve_alert(&self, id: Uuid) -> AppResult<TemperatureAlertResponse> {
        let alert = self
            .uow
            .temperature()
            .find_alert(id)
            .await?
            .ok_or_not_found()?;

        if alert.status == AlertStatus::Resolved {
            return Err(AppError::validation("alert is already resolved"));
        }

        let alert = self
            .uow
            .temperature()
            .update_alert_status(id, AlertStatus::Resolved, Some(Utc::now()))
            .await?;

        Ok(TemperatureAlertResponse::from(alert))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_threshold_range_validation() {
        assert!(ensure_valid_range(dec!(-5), dec!(5)).is_ok());
        assert!(ensure_valid_range(dec!(2), dec!(2)).is_err());
        assert!(ensure_valid_range(dec!(4), dec!(2)).is_err());
    }

    #[test]
    fn test_out_of_range_message_names_room() {
        let room = StorageRoom {
            id: Uuid::new_v4(),
            cold_storage_id: None,
            name: "Chamber 1".to_string(),
            min_temperature: dec!(-2),
            max_temperature: dec!(4),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let msg = out_of_range_message(&room, dec!(7.5));
        assert!(msg.contains("Chamber 1"));
        assert!(msg.contains("7.5"));
    }
}
