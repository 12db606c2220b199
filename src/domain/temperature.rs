//! Storage rooms, temperature logs, and threshold alerts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A monitored room inside a cold storage, with temperature thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct StorageRoom {
    pub id: Uuid,
    pub cold_storage_id: Option<Uuid>,
    pub name: String,
    pub min_temperature: Decimal,
    pub max_temperature: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StorageRoom {
    /// Check whether a reading is within the room's allowed band.
    pub fn is_within_range(&self, temperature: Decimal) -> bool {
        temperature >= self.min_temperature && temperature <= self.max_temperature
    }
}

/// A single temperature reading.
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureLog {
    pub id: Uuid,
    pub storage_room_id: Option<Uuid>,
    pub logged_at: DateTime<Utc>,
    pub temperature: Decimal,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Alert lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AlertStatus::Active),
            "acknowledged" => Some(AlertStatus::Acknowledged),
            "resolved" => Some(AlertStatus::Resolved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
        }
    }
}

/// Raised when a log falls outside its room's thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureAlert {
    pub id: Uuid,
    pub storage_room_id: Uuid,
    pub temperature_log_id: Option<Uuid>,
    pub temperature: Decimal,
    pub message: String,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Storage room response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StorageRoomResponse {
    pub id: Uuid,
    pub cold_storage_id: Option<Uuid>,
    #[schema(example = "Chamber 1")]
    pub name: String,
    #[schema(value_type = String, example = "2.00")]
    pub min_temperature: Decimal,
    #[schema(value_type = String, example = "8.00")]
    pub max_temperature: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StorageRoom> for StorageRoomResponse {
    fn from(r: StorageRoom) -> Self {
        Self {
            id: r.id,
            cold_storage_id: r.cold_storage_id,
            name: r.name,
            min_temperature: r.min_temperature,
            max_temperature: r.max_temperature,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

/// Temperature log response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemperatureLogResponse {
    pub id: Uuid,
    pub storage_room_id: Option<Uuid>,
    pub logged_at: DateTime<Utc>,
    #[schema(value_type = String, example = "4.25")]
    pub temperature: Decimal,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TemperatureLog> for TemperatureLogResponse {
    fn from(l: TemperatureLog) -> Self {
        Self {
            id: l.id,
            storage_room_id: l.storage_room_id,
            logged_at: l.logged_at,
            temperature: l.temperature,
            created_by: l.created_by,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Temperature alert response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemperatureAlertResponse {
    pub id: Uuid,
    pub storage_room_id: Uuid,
    pub temperature_log_id: Option<Uuid>,
    #[schema(value_type = String, example = "12.50")]
    pub temperature: Decimal,
    pub message: String,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<TemperatureAlert> for TemperatureAlertResponse {
    fn from(a: TemperatureAlert) -> Self {
        Self {
            id: a.id,
            storage_room_id: a.storage_room_id,
            temperature_log_id: a.temperature_log_id,
            temperature: a.temperature,
            message: a.message,
            status: a.status,
            created_at: a.created_at,
            resolved_at: a.resolved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn room(min: &str, max: &str) -> StorageRoom {
        StorageRoom {
            id: Uuid::new_v4(),
            cold_storage_id: None,
            name: "Chamber 1".to_string(),
            min_temperature: Decimal::from_str(min).unwrap(),
            max_temperature: Decimal::from_str(max).unwrap(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_within_range() {
        let r = room("2.00", "8.00");
        assert!(r.is_within_range(Decimal::from_str("4.25").unwrap()));
        assert!(r.is_within_range(Decimal::from_str("2.00").unwrap()));
        assert!(r.is_within_range(Decimal::from_str("8.00").unwrap()));
    }

    #[test]
    fn test_out_of_range() {
        let r = room("2.00", "8.00");
        assert!(!r.is_within_range(Decimal::from_str("1.99").unwrap()));
        assert!(!r.is_within_range(Decimal::from_str("12.50").unwrap()));
    }
}
