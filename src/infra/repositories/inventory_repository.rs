//! Inventory repository: inward (intake) and outward (dispatch) entries.
//!
//! Remaining stock is always derived as inward quantity minus the sum
//! of linked outward quantities; it is never stored.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::entities::inward_entry::{self, Entity as InwardEntity};
use super::entities::outward_entry::{self, Entity as OutwardEntity};
use crate::domain::{
    InwardEntry, OutwardEntry, PackagingType, PaymentMethod, PaymentStatus, QualityGrade,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields accepted when recording an intake.
#[derive(Debug, Clone)]
pub struct NewInwardEntry {
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
}

/// Fields accepted when recording a dispatch.
#[derive(Debug, Clone)]
pub struct NewOutwardEntry {
    pub inward_entry_id: Uuid,
    pub quantity: Decimal,
    pub packaging_type: PackagingType,
    pub receipt_number: String,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_by: Uuid,
}

/// Filters for listing inward entries.
#[derive(Debug, Clone, Default)]
pub struct InwardFilter {
    pub person_id: Option<Uuid>,
    pub cold_storage_id: Option<Uuid>,
    pub crop_search: Option<String>,
}

/// Total stored quantity per crop, for the dashboard breakdown.
#[derive(Debug, Clone, FromQueryResult)]
pub struct CropQuantity {
    pub crop_name: String,
    pub total_quantity: Option<Decimal>,
}

/// Total moved quantity per facility, for the owner dashboard.
#[derive(Debug, Clone, FromQueryResult)]
pub struct StorageQuantity {
    pub cold_storage_id: Option<Uuid>,
    pub total: Option<Decimal>,
}

#[derive(FromQueryResult)]
struct QuantitySum {
    total: Option<Decimal>,
}

#[derive(FromQueryResult)]
struct GroupedSum {
    inward_entry_id: Uuid,
    total: Option<Decimal>,
}

/// Inventory repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Record an intake
    async fn create_inward(&self, new: NewInwardEntry) -> AppResult<InwardEntry>;

    /// Find inward entry by ID
    async fn find_inward(&self, id: Uuid) -> AppResult<Option<InwardEntry>>;

    /// List inward entries, newest first
    async fn list_inwards(
        &self,
        filter: &InwardFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<InwardEntry>, u64)>;

    /// Inward entries created at or after the cutoff
    async fn inward_count_since(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// All inward entries matching the filter, without pagination
    /// (stock view and owner dashboard)
    async fn list_inwards_unpaged(&self, filter: &InwardFilter) -> AppResult<Vec<InwardEntry>>;

    /// All inward entries matching the filter within an optional
    /// created-at range (for the ledger)
    async fn inwards_between(
        &self,
        filter: &InwardFilter,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<InwardEntry>>;

    /// Record a dispatch
    async fn create_outward(&self, new: NewOutwardEntry) -> AppResult<OutwardEntry>;

    /// Find outward entry by ID
    async fn find_outward(&self, id: Uuid) -> AppResult<Option<OutwardEntry>>;

    /// List outward entries, newest first, optionally scoped to one inward entry
    async fn list_outwards(
        &self,
        inward_entry_id: Option<Uuid>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<OutwardEntry>, u64)>;

    /// All outward entries within an optional created-at range, filtered
    /// through the linked inward entry (for the ledger)
    async fn outwards_between(
        &self,
        filter: &InwardFilter,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<OutwardEntry>>;

    /// Sum of dispatched quantity for one inward entry
    async fn outward_total_for(&self, inward_entry_id: Uuid) -> AppResult<Decimal>;

    /// Sum of dispatched quantity per inward entry, grouped in one query
    async fn outward_totals(
        &self,
        inward_entry_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Decimal>>;

    /// Total intake quantity across all entries
    async fn total_inward_quantity(&self) -> AppResult<Decimal>;

    /// Total dispatched quantity across all entries
    async fn total_outward_quantity(&self) -> AppResult<Decimal>;

    /// Stored quantity per crop, largest first
    async fn inventory_by_crop(&self, limit: u64) -> AppResult<Vec<CropQuantity>>;

    /// Intake quantity grouped by facility
    async fn inward_quantity_by_storage(&self) -> AppResult<Vec<StorageQuantity>>;

    /// Dispatched quantity grouped by the linked inward entry's facility
    async fn outward_quantity_by_storage(&self) -> AppResult<Vec<StorageQuantity>>;
}

/// Concrete implementation of InventoryRepository
pub struct InventoryStore {
    db: DatabaseConnection,
}

impl InventoryStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InventoryRepository for InventoryStore {
    async fn create_inward(&self, new: NewInwardEntry) -> AppResult<InwardEntry> {
        let active_model = inward_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            person_id: Set(new.person_id),
            cold_storage_id: Set(new.cold_storage_id),
            crop_name: Set(new.crop_name),
            crop_variety: Set(new.crop_variety),
            size_grade: Set(new.size_grade),
            quantity: Set(new.quantity),
            packaging_type: Set(new.packaging_type.as_str().to_string()),
            quality_grade: Set(new.quality_grade.as_str().to_string()),
            rack_number: Set(new.rack_number),
            storage_room: Set(new.storage_room),
            expected_storage_duration_days: Set(new.expected_storage_duration_days),
            entry_date: Set(new.entry_date),
            created_by: Set(new.created_by),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(InwardEntry::from(model))
    }

    async fn find_inward(&self, id: Uuid) -> AppResult<Option<InwardEntry>> {
        let result = InwardEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(InwardEntry::from))
    }

    async fn list_inwards(
        &self,
        filter: &InwardFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<InwardEntry>, u64)> {
        let mut query = InwardEntity::find().order_by_desc(inward_entry::Column::CreatedAt);

        if let Some(person_id) = filter.person_id {
            query = query.filter(inward_entry::Column::PersonId.eq(person_id));
        }
        if let Some(cold_storage_id) = filter.cold_storage_id {
            query = query.filter(inward_entry::Column::ColdStorageId.eq(cold_storage_id));
        }
        if let Some(ref term) = filter.crop_search {
            query = query.filter(inward_entry::Column::CropName.contains(term));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(InwardEntry::from).collect(), total))
    }

    async fn inward_count_since(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        InwardEntity::find()
            .filter(inward_entry::Column::CreatedAt.gte(cutoff))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn list_inwards_unpaged(&self, filter: &InwardFilter) -> AppResult<Vec<InwardEntry>> {
        let mut query = InwardEntity::find().order_by_desc(inward_entry::Column::CreatedAt);

        if let Some(person_id) = filter.person_id {
            query = query.filter(inward_entry::Column::PersonId.eq(person_id));
        }
        if let Some(cold_storage_id) = filter.cold_storage_id {
            query = query.filter(inward_entry::Column::ColdStorageId.eq(cold_storage_id));
        }
        if let Some(ref term) = filter.crop_search {
            query = query.filter(inward_entry::Column::CropName.contains(term));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(InwardEntry::from).collect())
    }

    async fn inwards_between(
        &self,
        filter: &InwardFilter,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<InwardEntry>> {
        let mut query = InwardEntity::find().order_by_asc(inward_entry::Column::CreatedAt);

        if let Some(person_id) = filter.person_id {
            query = query.filter(inward_entry::Column::PersonId.eq(person_id));
        }
        if let Some(ref term) = filter.crop_search {
            query = query.filter(inward_entry::Column::CropName.contains(term));
        }
        if let Some(from) = from {
            query = query.filter(inward_entry::Column::CreatedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(inward_entry::Column::CreatedAt.lt(to));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(InwardEntry::from).collect())
    }

    async fn create_outward(&self, new: NewOutwardEntry) -> AppResult<OutwardEntry> {
        let active_model = outward_active_model(new);
        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(OutwardEntry::from(model))
    }

    async fn find_outward(&self, id: Uuid) -> AppResult<Option<OutwardEntry>> {
        let result = OutwardEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(OutwardEntry::from))
    }

    async fn list_outwards(
        &self,
        inward_entry_id: Option<Uuid>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<OutwardEntry>, u64)> {
        let mut query = OutwardEntity::find().order_by_desc(outward_entry::Column::CreatedAt);

        if let Some(inward_id) = inward_entry_id {
            query = query.filter(outward_entry::Column::InwardEntryId.eq(inward_id));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(OutwardEntry::from).collect(), total))
    }

    async fn outwards_between(
        &self,
        filter: &InwardFilter,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<OutwardEntry>> {
        let mut query = OutwardEntity::find().order_by_asc(outward_entry::Column::CreatedAt);

        // Person and crop filters live on the linked inward entry
        if filter.person_id.is_some() || filter.crop_search.is_some() {
            query = query.join(JoinType::InnerJoin, outward_entry::Relation::InwardEntry.def());

            if let Some(person_id) = filter.person_id {
                query = query.filter(inward_entry::Column::PersonId.eq(person_id));
            }
            if let Some(ref term) = filter.crop_search {
                query = query.filter(inward_entry::Column::CropName.contains(term));
            }
        }

        if let Some(from) = from {
            query = query.filter(outward_entry::Column::CreatedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(outward_entry::Column::CreatedAt.lt(to));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(OutwardEntry::from).collect())
    }

    async fn outward_total_for(&self, inward_entry_id: Uuid) -> AppResult<Decimal> {
        let row = OutwardEntity::find()
            .select_only()
            .column_as(outward_entry::Column::Quantity.sum(), "total")
            .filter(outward_entry::Column::InwardEntryId.eq(inward_entry_id))
            .into_model::<QuantitySum>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }

    async fn outward_totals(
        &self,
        inward_entry_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Decimal>> {
        if inward_entry_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = OutwardEntity::find()
            .select_only()
            .column(outward_entry::Column::InwardEntryId)
            .column_as(outward_entry::Column::Quantity.sum(), "total")
            .filter(outward_entry::Column::InwardEntryId.is_in(inward_entry_ids.iter().copied()))
            .group_by(outward_entry::Column::InwardEntryId)
            .into_model::<GroupedSum>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|r| (r.inward_entry_id, r.total.unwrap_or_default()))
            .collect())
    }

    async fn total_inward_quantity(&self) -> AppResult<Decimal> {
        let row = InwardEntity::find()
            .select_only()
            .column_as(inward_entry::Column::Quantity.sum(), "total")
            .into_model::<QuantitySum>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }

    async fn total_outward_quantity(&self) -> AppResult<Decimal> {
        let row = OutwardEntity::find()
            .select_only()
            .column_as(outward_entry::Column::Quantity.sum(), "total")
            .into_model::<QuantitySum>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }

    async fn inventory_by_crop(&self, limit: u64) -> AppResult<Vec<CropQuantity>> {
        InwardEntity::find()
            .select_only()
            .column(inward_entry::Column::CropName)
            .column_as(inward_entry::Column::Quantity.sum(), "total_quantity")
            .group_by(inward_entry::Column::CropName)
            .order_by_desc(inward_entry::Column::Quantity.sum())
            .limit(limit)
            .into_model::<CropQuantity>()
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn inward_quantity_by_storage(&self) -> AppResult<Vec<StorageQuantity>> {
        InwardEntity::find()
            .select_only()
            .column(inward_entry::Column::ColdStorageId)
            .column_as(inward_entry::Column::Quantity.sum(), "total")
            .group_by(inward_entry::Column::ColdStorageId)
            .into_model::<StorageQuantity>()
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn outward_quantity_by_storage(&self) -> AppResult<Vec<StorageQuantity>> {
        OutwardEntity::find()
            .select_only()
            .column(inward_entry::Column::ColdStorageId)
            .column_as(outward_entry::Column::Quantity.sum(), "total")
            .join(JoinType::InnerJoin, outward_entry::Relation::InwardEntry.def())
            .group_by(inward_entry::Column::ColdStorageId)
            .into_model::<StorageQuantity>()
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }
}

/// Build the active model for a dispatch row; shared with the
/// transaction-scoped repository.
pub(crate) fn outward_active_model(new: NewOutwardEntry) -> outward_entry::ActiveModel {
    outward_entry::ActiveModel {
        id: Set(Uuid::new_v4()),
        inward_entry_id: Set(new.inward_entry_id),
        quantity: Set(new.quantity),
        packaging_type: Set(new.packaging_type.as_str().to_string()),
        receipt_number: Set(new.receipt_number),
        payment_status: Set(new.payment_status.as_str().to_string()),
        payment_method: Set(new
            .payment_method
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()),
        created_by: Set(new.created_by),
        created_at: Set(chrono::Utc::now()),
    }
}
