//! Cold storage facility entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A cold storage facility with a capacity budget in metric tonnes.
#[derive(Debug, Clone, Serialize)]
pub struct ColdStorage {
    pub id: Uuid,
    pub name: String,
    /// Unique short code for the facility
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Total capacity in MT
    pub total_capacity: Decimal,
    pub owner_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub contact_phone: String,
    pub contact_email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ColdStorage {
    /// Name with city suffix when available, for dropdowns
    pub fn display_name(&self) -> String {
        if self.city.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.city)
        }
    }
}

/// Cold storage response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColdStorageResponse {
    pub id: Uuid,
    #[schema(example = "Hilltop Cold Store")]
    pub name: String,
    #[schema(example = "HCS-01")]
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[schema(value_type = String, example = "500.00")]
    pub total_capacity: Decimal,
    pub owner_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub contact_phone: String,
    pub contact_email: String,
    pub is_active: bool,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ColdStorage> for ColdStorageResponse {
    fn from(s: ColdStorage) -> Self {
        let display_name = s.display_name();
        Self {
            id: s.id,
            name: s.name,
            code: s.code,
            address: s.address,
            city: s.city,
            state: s.state,
            total_capacity: s.total_capacity,
            owner_id: s.owner_id,
            manager_id: s.manager_id,
            contact_phone: s.contact_phone,
            contact_email: s.contact_email,
            is_active: s.is_active,
            display_name,
            created_at: s.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(city: &str) -> ColdStorage {
        ColdStorage {
            id: Uuid::new_v4(),
            name: "Hilltop".to_string(),
            code: "HCS-01".to_string(),
            address: String::new(),
            city: city.to_string(),
            state: String::new(),
            total_capacity: Decimal::from(500),
            owner_id: Uuid::new_v4(),
            manager_id: None,
            contact_phone: String::new(),
            contact_email: String::new(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_includes_city() {
        assert_eq!(storage("Nashik").display_name(), "Hilltop Nashik");
        assert_eq!(storage("").display_name(), "Hilltop");
    }
}
