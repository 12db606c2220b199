//! Payment request entity (mock payment integration).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a payment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentRequestStatus {
    Requested,
    Paid,
    Failed,
}

impl PaymentRequestStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(PaymentRequestStatus::Requested),
            "paid" => Some(PaymentRequestStatus::Paid),
            "failed" => Some(PaymentRequestStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentRequestStatus::Requested => "requested",
            PaymentRequestStatus::Paid => "paid",
            PaymentRequestStatus::Failed => "failed",
        }
    }
}

/// A payment request raised for an outward entry.
///
/// One request per outward entry; the payload carries provider data
/// (currently always the mock marker).
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub id: Uuid,
    pub outward_entry_id: Uuid,
    pub status: PaymentRequestStatus,
    pub method: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Payment request response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentRequestResponse {
    pub id: Uuid,
    pub outward_entry_id: Uuid,
    pub status: PaymentRequestStatus,
    #[schema(example = "upi")]
    pub method: String,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentRequest> for PaymentRequestResponse {
    fn from(p: PaymentRequest) -> Self {
        Self {
            id: p.id,
            outward_entry_id: p.outward_entry_id,
            status: p.status,
            method: p.method,
            payload: p.payload,
            created_at: p.created_at,
        }
    }
}
