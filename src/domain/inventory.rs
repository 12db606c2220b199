//! Inward/outward inventory entities and dispatch receipts.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{RECEIPT_NUMBER_HEX_LENGTH, RECEIPT_NUMBER_PREFIX};

/// How produce is packed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PackagingType {
    Bori,
    Crate,
    Box,
}

impl PackagingType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bori" => Some(PackagingType::Bori),
            "crate" => Some(PackagingType::Crate),
            "box" => Some(PackagingType::Box),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackagingType::Bori => "bori",
            PackagingType::Crate => "crate",
            PackagingType::Box => "box",
        }
    }
}

/// Produce quality grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum QualityGrade {
    A,
    B,
    C,
}

impl QualityGrade {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(QualityGrade::A),
            "B" => Some(QualityGrade::B),
            "C" => Some(QualityGrade::C),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
        }
    }
}

impl Default for QualityGrade {
    fn default() -> Self {
        QualityGrade::A
    }
}

/// Payment state of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// How a dispatch was (or will be) paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
    BankTransfer,
    Card,
    Other,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "upi" => Some(PaymentMethod::Upi),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "card" => Some(PaymentMethod::Card),
            "other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Card => "card",
            PaymentMethod::Other => "other",
        }
    }
}

/// Produce intake record.
///
/// `remaining_quantity` is derived at read time from the sum of linked
/// outward entries; it is never stored.
#[derive(Debug, Clone, Serialize)]
pub struct InwardEntry {
    pub id: Uuid,
    pub person_id: Uuid,
    pub cold_storage_id: Option<Uuid>,
    pub crop_name: String,
    pub crop_variety: String,
    pub size_grade: String,
    pub quantity: Decimal,
    pub packaging_type: PackagingType,
    pub quality_grade: QualityGrade,
    pub rack_number: String,
    pub storage_room: String,
    pub expected_storage_duration_days: Option<i32>,
    pub entry_date: NaiveDate,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Dispatch record against an inward entry.
#[derive(Debug, Clone, Serialize)]
pub struct OutwardEntry {
    pub id: Uuid,
    pub inward_entry_id: Uuid,
    pub quantity: Decimal,
    pub packaging_type: PackagingType,
    pub receipt_number: String,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Generate a dispatch receipt number: RCP- followed by 12 uppercase hex.
pub fn generate_receipt_number() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}",
        RECEIPT_NUMBER_PREFIX,
        hex[..RECEIPT_NUMBER_HEX_LENGTH].to_uppercase()
    )
}

/// Inward entry response with derived remaining quantity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InwardEntryResponse {
    pub id: Uuid,
    pub person_id: Uuid,
    pub cold_storage_id: Option<Uuid>,
    #[schema(example = "Potato")]
    pub crop_name: String,
    pub crop_variety: String,
    pub size_grade: String,
    #[schema(value_type = String, example = "100.000")]
    pub quantity: Decimal,
    pub packaging_type: PackagingType,
    pub quality_grade: QualityGrade,
    pub rack_number: String,
    pub storage_room: String,
    pub expected_storage_duration_days: Option<i32>,
    pub entry_date: NaiveDate,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "75.000")]
    pub remaining_quantity: Decimal,
}

impl InwardEntryResponse {
    pub fn from_entry(entry: InwardEntry, outward_total: Decimal) -> Self {
        let remaining = entry.quantity - outward_total;
        Self {
            id: entry.id,
            person_id: entry.person_id,
            cold_storage_id: entry.cold_storage_id,
            crop_name: entry.crop_name,
            crop_variety: entry.crop_variety,
            size_grade: entry.size_grade,
            quantity: entry.quantity,
            packaging_type: entry.packaging_type,
            quality_grade: entry.quality_grade,
            rack_number: entry.rack_number,
            storage_room: entry.storage_room,
            expected_storage_duration_days: entry.expected_storage_duration_days,
            entry_date: entry.entry_date,
            created_by: entry.created_by,
            created_at: entry.created_at,
            remaining_quantity: remaining,
        }
    }
}

/// Outward entry response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OutwardEntryResponse {
    pub id: Uuid,
    pub inward_entry_id: Uuid,
    #[schema(value_type = String, example = "25.000")]
    pub quantity: Decimal,
    pub packaging_type: PackagingType,
    #[schema(example = "RCP-5F2A9C01B3D4")]
    pub receipt_number: String,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<OutwardEntry> for OutwardEntryResponse {
    fn from(o: OutwardEntry) -> Self {
        Self {
            id: o.id,
            inward_entry_id: o.inward_entry_id,
            quantity: o.quantity,
            packaging_type: o.packaging_type,
            receipt_number: o.receipt_number,
            payment_status: o.payment_status,
            payment_method: o.payment_method,
            created_by: o.created_by,
            created_at: o.created_at,
        }
    }
}

/// Remaining-stock view of an inward entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockItem {
    pub id: Uuid,
    pub person_id: Uuid,
    pub crop_name: String,
    pub crop_variety: String,
    pub packaging_type: PackagingType,
    #[schema(value_type = String)]
    pub quantity: Decimal,
    #[schema(value_type = String)]
    pub remaining_quantity: Decimal,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_format() {
        let receipt = generate_receipt_number();
        assert!(receipt.starts_with(RECEIPT_NUMBER_PREFIX));
        let hex = &receipt[RECEIPT_NUMBER_PREFIX.len()..];
        assert_eq!(hex.len(), RECEIPT_NUMBER_HEX_LENGTH);
        assert!(hex
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_receipt_numbers_unique() {
        let a = generate_receipt_number();
        let b = generate_receipt_number();
        assert_ne!(a, b);
    }

    #[test]
    fn test_packaging_type_parse() {
        assert_eq!(PackagingType::parse("bori"), Some(PackagingType::Bori));
        assert_eq!(PackagingType::parse("crate"), Some(PackagingType::Crate));
        assert_eq!(PackagingType::parse("sack"), None);
    }
}
