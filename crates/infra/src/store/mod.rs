//! Inventory storage boundary.
//!
//! Every method is tenant-scoped: rows belonging to another tenant behave as
//! if they did not exist. Multi-row mutations are atomic per call.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use wareflow_core::{CategoryId, DomainError, ItemId, StorageLocationId, TenantId, UserId};
use wareflow_inventory::{
    ArchiveStamp, InventoryItem, InventoryTransaction, MoveStrategy, Reason, StockRecord, StorageLocation,
};

pub use in_memory::{FaultPoint, InMemoryInventoryStore};
pub use postgres::PostgresInventoryStore;

/// Storage operation error.
///
/// These are infrastructure failures. The service reports all of them to
/// callers as one generic persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("storage location not found: {0}")]
    LocationNotFound(StorageLocationId),

    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("plan rejected: {0}")]
    Plan(#[from] DomainError),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("injected fault at {0:?}")]
    InjectedFault(FaultPoint),
}

/// Listing filter for items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// `false` lists active items only, `true` archived items only.
    pub archived: bool,
}

/// Inputs for executing a bulk move inside one store transaction.
#[derive(Debug, Clone)]
pub struct MoveExecution<'a> {
    pub strategy: MoveStrategy,
    pub item_ids: &'a [ItemId],
    pub target_location_id: StorageLocationId,
    pub reason: &'a Reason,
    pub actor: UserId,
    pub now: DateTime<Utc>,
}

/// What a committed move wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub item_ids: Vec<ItemId>,
    pub target_location_name: String,
    pub stock_rows_written: usize,
    pub ledger_entries_written: usize,
}

/// Tenant-scoped inventory persistence.
///
/// Update methods return the ids that matched; ids that do not exist in the
/// tenant are skipped. `move_items` is the exception: an unknown item or
/// location fails the whole batch.
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    async fn archive_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        stamp: &ArchiveStamp,
    ) -> Result<Vec<ItemId>, StoreError>;

    async fn restore_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError>;

    async fn recategorize_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        category_id: CategoryId,
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError>;

    /// Load the items among `ids` that exist, in `ids` order.
    async fn items_by_ids(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<InventoryItem>, StoreError>;

    /// Delete items together with their stock rows and ledger entries.
    async fn delete_items(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<ItemId>, StoreError>;

    /// Consolidate stock of the batch into one location, in one transaction.
    async fn move_items(&self, tenant_id: TenantId, execution: MoveExecution<'_>) -> Result<MoveOutcome, StoreError>;

    async fn list_items(&self, tenant_id: TenantId, filter: ItemFilter) -> Result<Vec<InventoryItem>, StoreError>;

    async fn get_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Option<InventoryItem>, StoreError>;

    async fn stock_for_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Vec<StockRecord>, StoreError>;

    /// Ledger of one item, newest first.
    async fn transactions_for_item(
        &self,
        tenant_id: TenantId,
        id: ItemId,
    ) -> Result<Vec<InventoryTransaction>, StoreError>;

    async fn list_locations(&self, tenant_id: TenantId) -> Result<Vec<StorageLocation>, StoreError>;
}

#[async_trait::async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn archive_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        stamp: &ArchiveStamp,
    ) -> Result<Vec<ItemId>, StoreError> {
        (**self).archive_items(tenant_id, ids, stamp).await
    }

    async fn restore_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError> {
        (**self).restore_items(tenant_id, ids, now).await
    }

    async fn recategorize_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        category_id: CategoryId,
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError> {
        (**self).recategorize_items(tenant_id, ids, category_id, now).await
    }

    async fn items_by_ids(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<InventoryItem>, StoreError> {
        (**self).items_by_ids(tenant_id, ids).await
    }

    async fn delete_items(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<ItemId>, StoreError> {
        (**self).delete_items(tenant_id, ids).await
    }

    async fn move_items(&self, tenant_id: TenantId, execution: MoveExecution<'_>) -> Result<MoveOutcome, StoreError> {
        (**self).move_items(tenant_id, execution).await
    }

    async fn list_items(&self, tenant_id: TenantId, filter: ItemFilter) -> Result<Vec<InventoryItem>, StoreError> {
        (**self).list_items(tenant_id, filter).await
    }

    async fn get_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        (**self).get_item(tenant_id, id).await
    }

    async fn stock_for_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Vec<StockRecord>, StoreError> {
        (**self).stock_for_item(tenant_id, id).await
    }

    async fn transactions_for_item(
        &self,
        tenant_id: TenantId,
        id: ItemId,
    ) -> Result<Vec<InventoryTransaction>, StoreError> {
        (**self).transactions_for_item(tenant_id, id).await
    }

    async fn list_locations(&self, tenant_id: TenantId) -> Result<Vec<StorageLocation>, StoreError> {
        (**self).list_locations(tenant_id).await
    }
}
