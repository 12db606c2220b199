//! Person entity: farmers and vendors who store produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Type of person an inward entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Farmer,
    Vendor,
}

impl PersonType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "farmer" => Some(PersonType::Farmer),
            "vendor" => Some(PersonType::Vendor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonType::Farmer => "farmer",
            PersonType::Vendor => "vendor",
        }
    }
}

/// A farmer or vendor tracked by mobile number.
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub id: Uuid,
    pub person_type: PersonType,
    pub name: String,
    pub mobile_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Person response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersonResponse {
    pub id: Uuid,
    pub person_type: PersonType,
    #[schema(example = "Ram Kumar")]
    pub name: String,
    #[schema(example = "9111111111")]
    pub mobile_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            person_type: p.person_type,
            name: p.name,
            mobile_number: p.mobile_number,
            address: p.address,
            created_at: p.created_at,
        }
    }
}
