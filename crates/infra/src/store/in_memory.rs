//! In-memory inventory store for tests, demos and local development.
//!
//! All state sits behind one `RwLock`. Multi-row mutations work on a clone of
//! the state and swap it in only when every step succeeded, so a failure at
//! any point leaves nothing behind. Faults can be injected at named points to
//! exercise that path.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use wareflow_core::{CategoryId, ItemId, StorageLocationId, TenantId};
use wareflow_inventory::{
    ArchiveStamp, Category, InventoryItem, InventoryTransaction, MoveContext, StockRecord, StorageLocation,
};

use super::{InventoryStore, ItemFilter, MoveExecution, MoveOutcome, StoreError};

/// Where an injected fault fires. Each injected fault fires once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    /// Before inserting the n-th (0-based) consolidated stock row of a move.
    MoveStockInsert(usize),
    /// Before appending the n-th (0-based) ledger entry of a move.
    MoveLedgerInsert(usize),
    /// After a move has written everything, before it becomes visible.
    MoveCommit,
    /// Before archive, restore or recategorize updates rows.
    UpdateItems,
    /// Before a permanent delete removes rows.
    DeleteItems,
}

#[derive(Debug, Clone, Default)]
struct State {
    items: HashMap<ItemId, InventoryItem>,
    stock: BTreeMap<(ItemId, StorageLocationId), i64>,
    transactions: Vec<InventoryTransaction>,
    locations: HashMap<StorageLocationId, StorageLocation>,
    categories: HashMap<CategoryId, Category>,
}

impl State {
    fn tenant_item(&self, tenant_id: TenantId, id: &ItemId) -> Option<&InventoryItem> {
        self.items.get(id).filter(|i| i.tenant_id == tenant_id)
    }

    fn tenant_item_mut(&mut self, tenant_id: TenantId, id: &ItemId) -> Option<&mut InventoryItem> {
        self.items.get_mut(id).filter(|i| i.tenant_id == tenant_id)
    }

    fn stock_rows(&self, batch: &HashSet<ItemId>) -> Vec<StockRecord> {
        self.stock
            .iter()
            .filter(|((item, _), _)| batch.contains(item))
            .map(|((item, loc), qty)| StockRecord::new(*item, *loc, *qty))
            .collect()
    }

    fn recompute_quantity(&mut self, item_id: ItemId) {
        let total: i64 = self
            .stock
            .range((item_id, StorageLocationId::from_uuid(uuid::Uuid::nil()))..)
            .take_while(|((item, _), _)| *item == item_id)
            .map(|(_, qty)| *qty)
            .sum();
        if let Some(item) = self.items.get_mut(&item_id) {
            item.quantity = total;
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    state: RwLock<State>,
    fault: Mutex<Option<FaultPoint>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a fault that fires the next time execution reaches `point`.
    pub fn inject_fault(&self, point: FaultPoint) {
        if let Ok(mut fault) = self.fault.lock() {
            *fault = Some(point);
        }
    }

    pub fn add_location(&self, location: StorageLocation) -> Result<(), StoreError> {
        let mut state = self.write()?;
        state.locations.insert(location.id, location);
        Ok(())
    }

    pub fn add_category(&self, category: Category) -> Result<(), StoreError> {
        let mut state = self.write()?;
        state.categories.insert(category.id, category);
        Ok(())
    }

    pub fn add_item(&self, item: InventoryItem) -> Result<(), StoreError> {
        let mut state = self.write()?;
        let duplicate_sku = state
            .items
            .values()
            .any(|i| i.tenant_id == item.tenant_id && i.sku == item.sku && i.id != item.id);
        if duplicate_sku {
            return Err(StoreError::Constraint(format!("sku '{}' already exists", item.sku)));
        }
        state.items.insert(item.id, item);
        Ok(())
    }

    /// Set the quantity of an item at a location. Zero removes the row.
    pub fn set_stock(
        &self,
        tenant_id: TenantId,
        item_id: ItemId,
        location_id: StorageLocationId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if state.tenant_item(tenant_id, &item_id).is_none() {
            return Err(StoreError::ItemNotFound(item_id));
        }
        if !state
            .locations
            .get(&location_id)
            .is_some_and(|l| l.tenant_id == tenant_id)
        {
            return Err(StoreError::LocationNotFound(location_id));
        }
        match quantity {
            q if q > 0 => {
                state.stock.insert((item_id, location_id), q);
            }
            0 => {
                state.stock.remove(&(item_id, location_id));
            }
            q => return Err(StoreError::Constraint(format!("stock quantity must be positive, got {q}"))),
        }
        state.recompute_quantity(item_id);
        Ok(())
    }

    pub fn record_transaction(&self, entry: InventoryTransaction) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if state.tenant_item(entry.tenant_id, &entry.item_id).is_none() {
            return Err(StoreError::ItemNotFound(entry.item_id));
        }
        state.transactions.push(entry);
        Ok(())
    }

    /// Number of stock rows across all tenants, including rows that would be orphans.
    pub fn stock_row_count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.stock.len())
    }

    /// Number of ledger entries across all tenants.
    pub fn transaction_count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.transactions.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Backend("inventory state lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Backend("inventory state lock poisoned".to_string()))
    }

    fn check_fault(&self, point: FaultPoint) -> Result<(), StoreError> {
        let mut fault = self
            .fault
            .lock()
            .map_err(|_| StoreError::Backend("fault lock poisoned".to_string()))?;
        if *fault == Some(point) {
            *fault = None;
            return Err(StoreError::InjectedFault(point));
        }
        Ok(())
    }

    fn update_items<F>(&self, tenant_id: TenantId, ids: &[ItemId], mut apply: F) -> Result<Vec<ItemId>, StoreError>
    where
        F: FnMut(&mut InventoryItem),
    {
        let mut state = self.write()?;
        self.check_fault(FaultPoint::UpdateItems)?;

        let mut touched = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(item) = state.tenant_item_mut(tenant_id, id) {
                apply(item);
                touched.push(*id);
            }
        }
        Ok(touched)
    }
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn archive_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        stamp: &ArchiveStamp,
    ) -> Result<Vec<ItemId>, StoreError> {
        self.update_items(tenant_id, ids, |item| item.archive(stamp))
    }

    async fn restore_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError> {
        self.update_items(tenant_id, ids, |item| item.restore(now))
    }

    async fn recategorize_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        category_id: CategoryId,
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError> {
        let known = self
            .read()?
            .categories
            .get(&category_id)
            .is_some_and(|c| c.tenant_id == tenant_id);
        if !known {
            return Err(StoreError::CategoryNotFound(category_id));
        }
        self.update_items(tenant_id, ids, |item| item.recategorize(category_id, now))
    }

    async fn items_by_ids(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<InventoryItem>, StoreError> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.tenant_item(tenant_id, id).cloned())
            .collect())
    }

    async fn delete_items(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<ItemId>, StoreError> {
        let mut state = self.write()?;
        self.check_fault(FaultPoint::DeleteItems)?;

        let doomed: Vec<ItemId> = ids
            .iter()
            .filter(|id| state.tenant_item(tenant_id, id).is_some())
            .copied()
            .collect();
        let set: HashSet<ItemId> = doomed.iter().copied().collect();

        // No cascade here: dependent rows go first.
        state.stock.retain(|(item, _), _| !set.contains(item));
        state.transactions.retain(|t| !set.contains(&t.item_id));
        state.items.retain(|id, _| !set.contains(id));

        Ok(doomed)
    }

    async fn move_items(&self, tenant_id: TenantId, execution: MoveExecution<'_>) -> Result<MoveOutcome, StoreError> {
        let mut guard = self.write()?;
        let mut working = State::clone(&guard);

        for id in execution.item_ids {
            if working.tenant_item(tenant_id, id).is_none() {
                return Err(StoreError::ItemNotFound(*id));
            }
        }
        let target_location_name = working
            .locations
            .get(&execution.target_location_id)
            .filter(|l| l.tenant_id == tenant_id)
            .map(|l| l.name.clone())
            .ok_or(StoreError::LocationNotFound(execution.target_location_id))?;

        let batch: HashSet<ItemId> = execution.item_ids.iter().copied().collect();
        let current = working.stock_rows(&batch);
        let ctx = MoveContext {
            tenant_id,
            target_location_id: execution.target_location_id,
            target_location_name: &target_location_name,
            reason: execution.reason,
            actor: execution.actor,
            now: execution.now,
        };
        let plan = execution.strategy.plan(execution.item_ids, &current, &ctx)?;

        working.stock.retain(|(item, _), _| !batch.contains(item));
        for (n, row) in plan.stock_to_insert.iter().enumerate() {
            self.check_fault(FaultPoint::MoveStockInsert(n))?;
            let key = (row.item_id, row.storage_location_id);
            if working.stock.insert(key, row.quantity).is_some() {
                return Err(StoreError::Constraint(format!(
                    "duplicate stock row for item {} at {}",
                    row.item_id, row.storage_location_id
                )));
            }
        }
        for (n, entry) in plan.ledger.iter().enumerate() {
            self.check_fault(FaultPoint::MoveLedgerInsert(n))?;
            working.transactions.push(entry.clone());
        }
        for id in &plan.item_ids {
            if let Some(item) = working.tenant_item_mut(tenant_id, id) {
                item.touch(execution.now);
            }
        }
        self.check_fault(FaultPoint::MoveCommit)?;

        *guard = working;
        Ok(MoveOutcome {
            item_ids: plan.item_ids,
            target_location_name,
            stock_rows_written: plan.stock_to_insert.len(),
            ledger_entries_written: plan.ledger.len(),
        })
    }

    async fn list_items(&self, tenant_id: TenantId, filter: ItemFilter) -> Result<Vec<InventoryItem>, StoreError> {
        let state = self.read()?;
        let mut items: Vec<InventoryItem> = state
            .items
            .values()
            .filter(|i| i.tenant_id == tenant_id && i.is_archived == filter.archived)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(items)
    }

    async fn get_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        Ok(self.read()?.tenant_item(tenant_id, &id).cloned())
    }

    async fn stock_for_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Vec<StockRecord>, StoreError> {
        let state = self.read()?;
        if state.tenant_item(tenant_id, &id).is_none() {
            return Ok(vec![]);
        }
        Ok(state.stock_rows(&HashSet::from([id])))
    }

    async fn transactions_for_item(
        &self,
        tenant_id: TenantId,
        id: ItemId,
    ) -> Result<Vec<InventoryTransaction>, StoreError> {
        let state = self.read()?;
        Ok(state
            .transactions
            .iter()
            .rev()
            .filter(|t| t.tenant_id == tenant_id && t.item_id == id)
            .cloned()
            .collect())
    }

    async fn list_locations(&self, tenant_id: TenantId) -> Result<Vec<StorageLocation>, StoreError> {
        let state = self.read()?;
        let mut locations: Vec<StorageLocation> = state
            .locations
            .values()
            .filter(|l| l.tenant_id == tenant_id)
            .cloned()
            .collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wareflow_core::{TransactionId, UserId};
    use wareflow_inventory::{MoveStrategy, Reason, TransactionKind};

    struct Fixture {
        store: InMemoryInventoryStore,
        tenant: TenantId,
        item: ItemId,
        x: StorageLocationId,
        z: StorageLocationId,
    }

    fn fixture() -> Fixture {
        let store = InMemoryInventoryStore::new();
        let tenant = TenantId::new();
        let item = InventoryItem::new(tenant, "SKU-1", "Crate", Utc::now());
        let x = StorageLocation::new(tenant, "X");
        let z = StorageLocation::new(tenant, "Z");
        let (item_id, x_id, z_id) = (item.id, x.id, z.id);
        store.add_item(item).unwrap();
        store.add_location(x).unwrap();
        store.add_location(z).unwrap();
        store.set_stock(tenant, item_id, x_id, 4).unwrap();
        Fixture {
            store,
            tenant,
            item: item_id,
            x: x_id,
            z: z_id,
        }
    }

    #[tokio::test]
    async fn delete_removes_dependent_rows() {
        let f = fixture();
        f.store
            .record_transaction(InventoryTransaction {
                id: TransactionId::new(),
                tenant_id: f.tenant,
                item_id: f.item,
                change_amount: 4,
                kind: TransactionKind::In,
                reason: "receiving".into(),
                storage_location_id: Some(f.x),
                created_by: UserId::new(),
                created_at: Utc::now(),
            })
            .unwrap();

        let deleted = f.store.delete_items(f.tenant, &[f.item]).await.unwrap();

        assert_eq!(deleted, vec![f.item]);
        assert_eq!(f.store.stock_row_count().unwrap(), 0);
        assert_eq!(f.store.transaction_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn other_tenants_items_are_invisible() {
        let f = fixture();
        let other = TenantId::new();

        assert!(f.store.get_item(other, f.item).await.unwrap().is_none());
        let stamp = ArchiveStamp {
            reason: "nope".into(),
            archived_at: Utc::now(),
            archived_by: UserId::new(),
        };
        assert!(f.store.archive_items(other, &[f.item], &stamp).await.unwrap().is_empty());
        assert!(f.store.delete_items(other, &[f.item]).await.unwrap().is_empty());
        assert!(f.store.get_item(f.tenant, f.item).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_location_fails_move_without_changes() {
        let f = fixture();
        let reason = Reason::optional("reason", "").unwrap();
        let missing = StorageLocationId::new();

        let err = f
            .store
            .move_items(
                f.tenant,
                MoveExecution {
                    strategy: MoveStrategy::ConsolidateAll,
                    item_ids: &[f.item],
                    target_location_id: missing,
                    reason: &reason,
                    actor: UserId::new(),
                    now: Utc::now(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::LocationNotFound(id) if id == missing));
        assert_eq!(
            f.store.stock_for_item(f.tenant, f.item).await.unwrap(),
            vec![StockRecord::new(f.item, f.x, 4)]
        );
    }

    #[tokio::test]
    async fn fault_before_commit_discards_the_whole_move() {
        let f = fixture();
        let reason = Reason::optional("reason", "").unwrap();
        f.store.inject_fault(FaultPoint::MoveCommit);

        let execution = MoveExecution {
            strategy: MoveStrategy::ConsolidateAll,
            item_ids: &[f.item],
            target_location_id: f.z,
            reason: &reason,
            actor: UserId::new(),
            now: Utc::now(),
        };
        let err = f.store.move_items(f.tenant, execution.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::InjectedFault(FaultPoint::MoveCommit)));
        assert_eq!(f.store.transaction_count().unwrap(), 0);
        assert_eq!(
            f.store.stock_for_item(f.tenant, f.item).await.unwrap(),
            vec![StockRecord::new(f.item, f.x, 4)]
        );

        // Faults fire once; the retry goes through.
        let outcome = f.store.move_items(f.tenant, execution).await.unwrap();
        assert_eq!(outcome.target_location_name, "Z");
        assert_eq!(
            f.store.stock_for_item(f.tenant, f.item).await.unwrap(),
            vec![StockRecord::new(f.item, f.z, 4)]
        );
    }

    #[test]
    fn set_stock_keeps_item_total_in_sync() {
        let f = fixture();
        f.store.set_stock(f.tenant, f.item, f.z, 6).unwrap();
        f.store.set_stock(f.tenant, f.item, f.x, 0).unwrap();

        let state = f.store.read().unwrap();
        assert_eq!(state.items[&f.item].quantity, 6);
        assert_eq!(state.stock.len(), 1);
    }
}
