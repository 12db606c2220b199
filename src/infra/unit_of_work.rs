//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and manages database
//! transactions (begin, commit, rollback) so multi-step workflows
//! stay atomic. The stock guard on dispatch creation depends on the
//! serializable variant: the remaining-quantity check and the insert
//! must observe the same snapshot.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, FromQueryResult, IsolationLevel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    entities, outward_active_model, ColdStorageRepository, ColdStorageStore, InventoryRepository,
    InventoryStore, NewOutwardEntry, OtpRepository, OtpStore, PaymentRepository, PaymentStore,
    PersonRepository, PersonStore, TemperatureRepository, TemperatureStore, UserRepository,
    UserStore,
};
use crate::domain::{InwardEntry, OutwardEntry, PaymentRequest, PaymentRequestStatus};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. Note: this trait is not mockable directly due to generic
/// methods. For testing, mock the individual repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get OTP repository
    fn otps(&self) -> Arc<dyn OtpRepository>;

    /// Get person repository
    fn persons(&self) -> Arc<dyn PersonRepository>;

    /// Get cold storage repository
    fn cold_storages(&self) -> Arc<dyn ColdStorageRepository>;

    /// Get inventory repository
    fn inventory(&self) -> Arc<dyn InventoryRepository>;

    /// Get temperature repository
    fn temperature(&self) -> Arc<dyn TemperatureRepository>;

    /// Get payment repository
    fn payments(&self) -> Arc<dyn PaymentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled
    /// back on error. Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    ///
    /// Use this for operations requiring the strongest consistency
    /// guarantees, such as the dispatch stock check.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction. The context borrows the transaction
/// to ensure proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    /// Create a new transaction context
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get inventory repository for this transaction
    pub fn inventory(&self) -> TxInventoryRepository<'_> {
        TxInventoryRepository::new(self.txn)
    }

    /// Get payment repository for this transaction
    pub fn payments(&self) -> TxPaymentRepository<'_> {
        TxPaymentRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    otp_repo: Arc<OtpStore>,
    person_repo: Arc<PersonStore>,
    cold_storage_repo: Arc<ColdStorageStore>,
    inventory_repo: Arc<InventoryStore>,
    temperature_repo: Arc<TemperatureStore>,
    payment_repo: Arc<PaymentStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            otp_repo: Arc::new(OtpStore::new(db.clone())),
            person_repo: Arc::new(PersonStore::new(db.clone())),
            cold_storage_repo: Arc::new(ColdStorageStore::new(db.clone())),
            inventory_repo: Arc::new(InventoryStore::new(db.clone())),
            temperature_repo: Arc::new(TemperatureStore::new(db.clone())),
            payment_repo: Arc::new(PaymentStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn otps(&self) -> Arc<dyn OtpRepository> {
        self.otp_repo.clone()
    }

    fn persons(&self) -> Arc<dyn PersonRepository> {
        self.person_repo.clone()
    }

    fn cold_storages(&self) -> Arc<dyn ColdStorageRepository> {
        self.cold_storage_repo.clone()
    }

    fn inventory(&self) -> Arc<dyn InventoryRepository> {
        self.inventory_repo.clone()
    }

    fn temperature(&self) -> Arc<dyn TemperatureRepository> {
        self.temperature_repo.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f)
            .await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f)
            .await
    }
}

#[derive(FromQueryResult)]
struct QuantitySum {
    total: Option<Decimal>,
}

/// Transaction-aware inventory repository.
///
/// Executes all operations within the provided transaction so the
/// remaining-stock check and the dispatch insert cannot interleave
/// with a concurrent dispatch against the same inward entry.
pub struct TxInventoryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxInventoryRepository<'a> {
    /// Create new transaction-aware repository
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find inward entry by ID
    pub async fn find_inward(&self, id: Uuid) -> AppResult<Option<InwardEntry>> {
        let result = entities::inward_entry::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(InwardEntry::from))
    }

    /// Find outward entry by ID
    pub async fn find_outward(&self, id: Uuid) -> AppResult<Option<OutwardEntry>> {
        let result = entities::outward_entry::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(OutwardEntry::from))
    }

    /// Sum of dispatched quantity for one inward entry
    pub async fn outward_total_for(&self, inward_entry_id: Uuid) -> AppResult<Decimal> {
        use entities::outward_entry;

        let row = outward_entry::Entity::find()
            .select_only()
            .column_as(outward_entry::Column::Quantity.sum(), "total")
            .filter(outward_entry::Column::InwardEntryId.eq(inward_entry_id))
            .into_model::<QuantitySum>()
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }

    /// Record a dispatch
    pub async fn create_outward(&self, new: NewOutwardEntry) -> AppResult<OutwardEntry> {
        let model = outward_active_model(new)
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(OutwardEntry::from(model))
    }

    /// Set payment status and method on a dispatch
    pub async fn set_outward_payment(
        &self,
        id: Uuid,
        status: crate::domain::PaymentStatus,
        method: crate::domain::PaymentMethod,
    ) -> AppResult<OutwardEntry> {
        use entities::outward_entry;

        let existing = outward_entry::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: outward_entry::ActiveModel = existing.into();
        active.payment_status = Set(status.as_str().to_string());
        active.payment_method = Set(method.as_str().to_string());

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(OutwardEntry::from(model))
    }
}

/// Transaction-aware payment request repository.
pub struct TxPaymentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPaymentRepository<'a> {
    /// Create new transaction-aware repository
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find the request raised for an outward entry, if any
    pub async fn find_by_outward(
        &self,
        outward_entry_id: Uuid,
    ) -> AppResult<Option<PaymentRequest>> {
        use entities::payment_request;

        let result = payment_request::Entity::find()
            .filter(payment_request::Column::OutwardEntryId.eq(outward_entry_id))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(PaymentRequest::from))
    }

    /// Raise a payment request for an outward entry
    pub async fn create(
        &self,
        outward_entry_id: Uuid,
        method: String,
        payload: serde_json::Value,
    ) -> AppResult<PaymentRequest> {
        use entities::payment_request;

        let active_model = payment_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            outward_entry_id: Set(outward_entry_id),
            status: Set(PaymentRequestStatus::Requested.as_str().to_string()),
            method: Set(method),
            payload: Set(payload),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(PaymentRequest::from(model))
    }
}
