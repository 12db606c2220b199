//! Inventory service: intake, dispatch, stock, and receipts.
//!
//! The dispatch path runs inside a serializable transaction so the
//! remaining-stock check and the insert see one consistent snapshot;
//! two concurrent dispatches cannot both drain the same stock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    generate_receipt_number, InwardEntryResponse, OutwardEntryResponse, PackagingType,
    PaymentMethod, PaymentRequestResponse, PaymentStatus, QualityGrade, StockItem,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{InwardFilter, NewInwardEntry, NewOutwardEntry};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Intake fields supplied by the client; created_by and entry_date are
/// stamped by the service.
#[derive(Debug, Clone)]
pub struct InwardInput {
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
}

/// Dispatch receipt view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReceiptResponse {
    #[schema(example = "RCP-5F2A9C01B3D4")]
    pub receipt_number: String,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    #[schema(value_type = String)]
    pub quantity: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Inventory service trait for dependency injection.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Record an intake
    async fn create_inward(
        &self,
        input: InwardInput,
        created_by: Uuid,
    ) -> AppResult<InwardEntryResponse>;

    /// Fetch one intake with its remaining quantity
    async fn get_inward(&self, id: Uuid) -> AppResult<InwardEntryResponse>;

    /// List intakes with remaining quantities
    async fn list_inwards(
        &self,
        filter: InwardFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<InwardEntryResponse>>;

    /// Entries that still hold stock (remaining quantity > 0)
    async fn stock(
        &self,
        person_id: Option<Uuid>,
        crop: Option<String>,
    ) -> AppResult<Vec<StockItem>>;

    /// Record a dispatch, guarded by the remaining-stock check
    async fn create_outward(
        &self,
        inward_entry_id: Uuid,
        quantity: Decimal,
        packaging_type: PackagingType,
        created_by: Uuid,
    ) -> AppResult<OutwardEntryResponse>;

    /// Fetch one dispatch
    async fn get_outward(&self, id: Uuid) -> AppResult<OutwardEntryResponse>;

    /// List dispatches, optionally scoped to one intake
    async fn list_outwards(
        &self,
        inward_entry_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<Paginated<OutwardEntryResponse>>;

    /// Receipt details for a dispatch
    async fn get_receipt(&self, outward_entry_id: Uuid) -> AppResult<ReceiptResponse>;

    /// Raise a mock payment request for a dispatch
    async fn trigger_payment(
        &self,
        outward_entry_id: Uuid,
        method: PaymentMethod,
    ) -> AppResult<PaymentRequestResponse>;
}

/// Quantity must be positive for both intake and dispatch
fn ensure_positive_quantity(quantity: Decimal) -> AppResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(AppError::validation("quantity must be greater than zero"));
    }
    Ok(())
}

/// Reject a dispatch that would take remaining stock below zero
fn ensure_stock(remaining: Decimal, requested: Decimal) -> AppResult<()> {
    if requested > remaining {
        return Err(AppError::InsufficientStock(remaining));
    }
    Ok(())
}

/// Concrete implementation of InventoryService using Unit of Work.
pub struct InventoryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> InventoryManager<U> {
    /// Create new inventory service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> InventoryService for InventoryManager<U> {
    async fn create_inward(
        &self,
        input: InwardInput,
        created_by: Uuid,
    ) -> AppResult<InwardEntryResponse> {
        ensure_positive_quantity(input.quantity)?;

        self.uow
            .persons()
            .find_by_id(input.person_id)
            .await?
            .ok_or(AppError::validation("person does not exist"))?;

        if let Some(storage_id) = input.cold_storage_id {
            self.uow
                .cold_storages()
                .find_by_id(storage_id)
                .await?
                .ok_or(AppError::validation("cold storage does not exist"))?;
        }

        let entry = self
            .uow
            .inventory()
            .create_inward(NewInwardEntry {
                person_id: input.person_id,
                cold_storage_id: input.cold_storage_id,
                crop_name: input.crop_name,
                crop_variety: input.crop_variety,
                size_grade: input.size_grade,
                quantity: input.quantity,
                packaging_type: input.packaging_type,
                quality_grade: input.quality_grade,
                rack_number: input.rack_number,
                storage_room: input.storage_room,
                expected_storage_duration_days: input.expected_storage_duration_days,
                entry_date: Utc::now().date_naive(),
                created_by: Some(created_by),
            })
            .await?;

        // A fresh entry has no dispatches yet
        Ok(InwardEntryResponse::from_entry(entry, Decimal::ZERO))
    }

    async fn get_inward(&self, id: Uuid) -> AppResult<InwardEntryResponse> {
        let entry = self
            .uow
            .inventory()
            .find_inward(id)
            .await?
            .ok_or_not_found()?;

        let dispatched = self.uow.inventory().outward_total_for(id).await?;
        Ok(InwardEntryResponse::from_entry(entry, dispatched))
    }

    async fn list_inwards(
        &self,
        filter: InwardFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<InwardEntryResponse>> {
        let (entries, total) = self.uow.inventory().list_inwards(&filter, &params).await?;

        let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        let totals = self.uow.inventory().outward_totals(&ids).await?;

        let data = entries
            .into_iter()
            .map(|entry| {
                let dispatched = totals.get(&entry.id).copied().unwrap_or_default();
                InwardEntryResponse::from_entry(entry, dispatched)
            })
            .collect();

        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn stock(
        &self,
        person_id: Option<Uuid>,
        crop: Option<String>,
    ) -> AppResult<Vec<StockItem>> {
        let filter = InwardFilter {
            person_id,
            crop_search: crop,
            ..InwardFilter::default()
        };

        let entries = self.uow.inventory().list_inwards_unpaged(&filter).await?;
        let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        let totals = self.uow.inventory().outward_totals(&ids).await?;

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let dispatched = totals.get(&entry.id).copied().unwrap_or_default();
                let remaining = entry.quantity - dispatched;
                (remaining > Decimal::ZERO).then(|| StockItem {
                    id: entry.id,
                    person_id: entry.person_id,
                    crop_name: entry.crop_name,
                    crop_variety: entry.crop_variety,
                    packaging_type: entry.packaging_type,
                    quantity: entry.quantity,
                    remaining_quantity: remaining,
                    created_at: entry.created_at,
                })
            })
            .collect())
    }

    async fn create_outward(
        &self,
        inward_entry_id: Uuid,
        quantity: Decimal,
        packaging_type: PackagingType,
        created_by: Uuid,
    ) -> AppResult<OutwardEntryResponse> {
        ensure_positive_quantity(quantity)?;

        let entry = self
            .uow
            .transaction_serializable(|ctx| {
                Box::pin(async move {
                    let inventory = ctx.inventory();

                    let inward = inventory
                        .find_inward(inward_entry_id)
                        .await?
                        .ok_or_not_found()?;

                    let dispatched = inventory.outward_total_for(inward_entry_id).await?;
                    ensure_stock(inward.quantity - dispatched, quantity)?;

                    inventory
                        .create_outward(NewOutwardEntry {
                            inward_entry_id,
                            quantity,
                            packaging_type,
                            receipt_number: generate_receipt_number(),
                            payment_status: PaymentStatus::Pending,
                            payment_method: None,
                            created_by,
                        })
                        .await
                })
            })
            .await?;

        tracing::info!(
            outward_id = %entry.id,
            receipt = %entry.receipt_number,
            "dispatch recorded"
        );

        Ok(OutwardEntryResponse::from(entry))
    }

    async fn get_outward(&self, id: Uuid) -> AppResult<OutwardEntryResponse> {
        let entry = self
            .uow
            .inventory()
            .find_outward(id)
            .await?
            .ok_or_not_found()?;

        Ok(OutwardEntryResponse::from(entry))
    }

    async fn list_outwards(
        &self,
        inward_entry_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<Paginated<OutwardEntryResponse>> {
        let (entries, total) = self
            .uow
            .inventory()
            .list_outwards(inward_entry_id, &params)
            .await?;

        let data = entries.into_iter().map(OutwardEntryResponse::from).collect();
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn get_receipt(&self, outward_entry_id: Uuid) -> AppResult<ReceiptResponse> {
        let entry = self
            .uow
            .inventory()
            .find_outward(outward_entry_id)
            .await?
            .ok_or_not_found()?;

        Ok(ReceiptResponse {
            receipt_number: entry.receipt_number,
            payment_status: entry.payment_status,
            payment_method: entry.payment_method,
            quantity: entry.quantity,
            created_at: entry.created_at,
        })
    }

    async fn trigger_payment(
        &self,
        outward_entry_id: Uuid,
        method: PaymentMethod,
    ) -> AppResult<PaymentRequestResponse> {
        let request = self
            .uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let inventory = ctx.inventory();
                    let payments = ctx.payments();

                    inventory
                        .find_outward(outward_entry_id)
                        .await?
                        .ok_or_not_found()?;

                    if payments.find_by_outward(outward_entry_id).await?.is_some() {
                        return Err(AppError::conflict("Payment request"));
                    }

                    inventory
                        .set_outward_payment(outward_entry_id, PaymentStatus::Pending, method)
                        .await?;

                    // No provider integration; the payload carries the mock marker
                    payments
                        .create(
                            outward_entry_id,
                            method.as_str().to_string(),
                            json!({"mock": true}),
                        )
                        .await
                })
            })
            .await?;

        Ok(PaymentRequestResponse::from(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_quantity_guard() {
        assert!(ensure_positive_quantity(dec!(0.001)).is_ok());
        assert!(ensure_positive_quantity(Decimal::ZERO).is_err());
        assert!(ensure_positive_quantity(dec!(-5)).is_err());
    }

    #[test]
    fn test_stock_guard_rejects_overdraw() {
        assert!(ensure_stock(dec!(100), dec!(100)).is_ok());
        assert!(ensure_stock(dec!(100), dec!(99.999)).is_ok());

        let err = ensure_stock(dec!(25.5), dec!(25.501)).unwrap_err();
        assert!(err.to_string().contains("Insufficient stock"));
        assert!(err.to_string().contains("25.5"));
    }

    #[test]
    fn test_stock_guard_allows_exact_drain() {
        assert!(ensure_stock(dec!(0.5), dec!(0.5)).is_ok());
        assert!(ensure_stock(Decimal::ZERO, dec!(0.001)).is_err());
    }
}
