//! Reporting service: dashboards and the movement ledger.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{DASHBOARD_PENDING_WINDOW_DAYS, DASHBOARD_TOP_CROPS, DEFAULT_TOTAL_CAPACITY_MT};
use crate::infra::repositories::InwardFilter;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Facility occupancy summary on the main dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StorageSummary {
    #[schema(value_type = String, example = "500.00")]
    pub total_capacity: Decimal,
    #[schema(value_type = String, example = "180.500")]
    pub occupied: Decimal,
    #[schema(value_type = String, example = "319.500")]
    pub available: Decimal,
}

/// Stored quantity for one crop
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CropTotal {
    #[schema(example = "Potato")]
    pub crop_name: String,
    #[schema(value_type = String)]
    pub total_quantity: Decimal,
}

/// Main dashboard payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub storage: StorageSummary,
    /// Inward entries recorded in the last seven days
    pub pending_requests: u64,
    pub active_alerts: u64,
    pub staff_count: u64,
    pub inventory_by_crop: Vec<CropTotal>,
}

/// Per-facility utilization row on the owner dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StorageUtilization {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub capacity: Decimal,
    #[schema(value_type = String)]
    pub occupied: Decimal,
    /// Occupied share of capacity, 0-100
    #[schema(value_type = String, example = "36.10")]
    pub utilization_percent: Decimal,
}

/// Owner dashboard payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerDashboardResponse {
    pub storages: Vec<StorageUtilization>,
}

/// Direction of a ledger movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LedgerEntryType {
    Inward,
    Outward,
}

/// One movement in the merged journal
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerEntry {
    pub entry_type: LedgerEntryType,
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[schema(value_type = String)]
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
}

/// Running totals for the journal period
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerTotals {
    #[schema(value_type = String)]
    pub inward_total: Decimal,
    #[schema(value_type = String)]
    pub outward_total: Decimal,
    #[schema(value_type = String)]
    pub net: Decimal,
}

/// Ledger payload: time-ordered movements with totals
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerResponse {
    pub entries: Vec<LedgerEntry>,
    pub totals: LedgerTotals,
}

/// Filters accepted by the ledger endpoint
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub person_id: Option<Uuid>,
    pub crop: Option<String>,
}

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Main operations dashboard
    async fn dashboard(&self) -> AppResult<DashboardResponse>;

    /// Per-facility utilization for owners
    async fn owner_dashboard(&self) -> AppResult<OwnerDashboardResponse>;

    /// Merged inward/outward movement journal
    async fn ledger(&self, filter: LedgerFilter) -> AppResult<LedgerResponse>;
}

/// Concrete implementation of ReportService using Unit of Work.
pub struct ReportDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportDesk<U> {
    /// Create new report service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Inclusive start of a day as UTC timestamp
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// Exclusive end of a day (start of the following day)
fn day_end_exclusive(date: NaiveDate) -> DateTime<Utc> {
    day_start(date) + Duration::days(1)
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportDesk<U> {
    async fn dashboard(&self) -> AppResult<DashboardResponse> {
        let capacity = self
            .uow
            .cold_storages()
            .total_active_capacity()
            .await?
            .filter(|c| *c > Decimal::ZERO)
            .unwrap_or_else(|| Decimal::from(DEFAULT_TOTAL_CAPACITY_MT));

        let inward_total = self.uow.inventory().total_inward_quantity().await?;
        let outward_total = self.uow.inventory().total_outward_quantity().await?;
        let occupied = (inward_total - outward_total).max(Decimal::ZERO);
        let available = (capacity - occupied).max(Decimal::ZERO);

        let cutoff = Utc::now() - Duration::days(DASHBOARD_PENDING_WINDOW_DAYS);
        let pending_requests = self.uow.inventory().inward_count_since(cutoff).await?;

        let active_alerts = self.uow.temperature().active_alert_count().await?;
        let staff_count = self.uow.users().staff_count().await?;

        let inventory_by_crop = self
            .uow
            .inventory()
            .inventory_by_crop(DASHBOARD_TOP_CROPS)
            .await?
            .into_iter()
            .map(|c| CropTotal {
                crop_name: c.crop_name,
                total_quantity: c.total_quantity.unwrap_or_default(),
            })
            .collect();

        Ok(DashboardResponse {
            storage: StorageSummary {
                total_capacity: capacity,
                occupied,
                available,
            },
            pending_requests,
            active_alerts,
            staff_count,
            inventory_by_crop,
        })
    }

    async fn owner_dashboard(&self) -> AppResult<OwnerDashboardResponse> {
        let storages = self.uow.cold_storages().list_all().await?;

        let inward_by_storage: HashMap<Option<Uuid>, Decimal> = self
            .uow
            .inventory()
            .inward_quantity_by_storage()
            .await?
            .into_iter()
            .map(|r| (r.cold_storage_id, r.total.unwrap_or_default()))
            .collect();

        let outward_by_storage: HashMap<Option<Uuid>, Decimal> = self
            .uow
            .inventory()
            .outward_quantity_by_storage()
            .await?
            .into_iter()
            .map(|r| (r.cold_storage_id, r.total.unwrap_or_default()))
            .collect();

        let hundred = Decimal::from(100);
        let rows = storages
            .into_iter()
            .map(|s| {
                let key = Some(s.id);
                let inward = inward_by_storage.get(&key).copied().unwrap_or_default();
                let outward = outward_by_storage.get(&key).copied().unwrap_or_default();
                let occupied = (inward - outward).max(Decimal::ZERO);

                let utilization_percent = if s.total_capacity > Decimal::ZERO {
                    (occupied / s.total_capacity * hundred).round_dp(2)
                } else {
                    Decimal::ZERO
                };

                StorageUtilization {
                    id: s.id,
                    name: s.name,
                    capacity: s.total_capacity,
                    occupied,
                    utilization_percent,
                }
            })
            .collect();

        Ok(OwnerDashboardResponse { storages: rows })
    }

    async fn ledger(&self, filter: LedgerFilter) -> AppResult<LedgerResponse> {
        let from = filter.date_from.map(day_start);
        let to = filter.date_to.map(day_end_exclusive);
        let inward_filter = InwardFilter {
            person_id: filter.person_id,
            crop_search: filter.crop,
            ..InwardFilter::default()
        };

        let inwards = self
            .uow
            .inventory()
            .inwards_between(&inward_filter, from, to)
            .await?;
        let outwards = self
            .uow
            .inventory()
            .outwards_between(&inward_filter, from, to)
            .await?;

        let inward_total: Decimal = inwards.iter().map(|e| e.quantity).sum();
        let outward_total: Decimal = outwards.iter().map(|e| e.quantity).sum();

        let mut entries: Vec<LedgerEntry> = inwards
            .into_iter()
            .map(|e| LedgerEntry {
                entry_type: LedgerEntryType::Inward,
                id: e.id,
                timestamp: e.created_at,
                quantity: e.quantity,
                crop_name: Some(e.crop_name),
                person_id: Some(e.person_id),
                receipt_number: None,
            })
            .chain(outwards.into_iter().map(|e| LedgerEntry {
                entry_type: LedgerEntryType::Outward,
                id: e.id,
                timestamp: e.created_at,
                quantity: e.quantity,
                crop_name: None,
                person_id: None,
                receipt_number: Some(e.receipt_number),
            }))
            .collect();

        entries.sort_by_key(|e| e.timestamp);

        Ok(LedgerResponse {
            entries,
            totals: LedgerTotals {
                inward_total,
                outward_total,
                net: inward_total - outward_total,
            },
        })
    }
}
