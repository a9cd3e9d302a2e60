//! Planning of bulk stock moves.
//!
//! A strategy turns the current stock rows of a batch into a [`MovePlan`]:
//! which rows to insert after all existing rows of the batch are removed, and
//! which ledger entries to append. Stores execute plans inside one
//! transaction and never compute quantities themselves.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use wareflow_core::{DomainError, DomainResult, ItemId, StorageLocationId, TenantId, TransactionId, UserId};

use crate::{InventoryTransaction, Reason, StockRecord, TransactionKind};

/// How stock is redistributed when items are moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveStrategy {
    /// Sum every location's quantity per item and put the total at the target.
    #[default]
    ConsolidateAll,
}

/// Everything a plan needs besides the stock rows themselves.
#[derive(Debug, Clone)]
pub struct MoveContext<'a> {
    pub tenant_id: TenantId,
    pub target_location_id: StorageLocationId,
    pub target_location_name: &'a str,
    pub reason: &'a Reason,
    pub actor: UserId,
    pub now: DateTime<Utc>,
}

impl MoveContext<'_> {
    /// Ledger reason: the resolved location name, plus the caller's note if any.
    pub fn ledger_reason(&self) -> String {
        if self.reason.is_empty() {
            format!("Moved to {}", self.target_location_name)
        } else {
            format!("Moved to {}: {}", self.target_location_name, self.reason.trimmed())
        }
    }
}

/// Result of planning a move for one batch.
///
/// `item_ids` is the full batch: the executing store deletes every stock row
/// of these items, then inserts `stock_to_insert` and appends `ledger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub item_ids: Vec<ItemId>,
    pub stock_to_insert: Vec<StockRecord>,
    pub ledger: Vec<InventoryTransaction>,
}

impl MovePlan {
    pub fn total_quantity(&self) -> i64 {
        self.stock_to_insert.iter().map(|r| r.quantity).sum()
    }
}

impl MoveStrategy {
    /// Build the plan for `item_ids` given their current stock rows.
    ///
    /// Rows for items outside the batch are ignored. Every item gets exactly
    /// one `transfer` ledger entry, including items with no stock.
    pub fn plan(&self, item_ids: &[ItemId], current: &[StockRecord], ctx: &MoveContext<'_>) -> DomainResult<MovePlan> {
        match self {
            MoveStrategy::ConsolidateAll => consolidate_all(item_ids, current, ctx),
        }
    }
}

fn consolidate_all(item_ids: &[ItemId], current: &[StockRecord], ctx: &MoveContext<'_>) -> DomainResult<MovePlan> {
    let mut totals: HashMap<ItemId, i64> = item_ids.iter().map(|id| (*id, 0)).collect();

    for row in current {
        if let Some(total) = totals.get_mut(&row.item_id) {
            *total = total.checked_add(row.quantity).ok_or_else(|| {
                DomainError::invariant(format!("stock total overflows for item {}", row.item_id))
            })?;
        }
    }

    let reason = ctx.ledger_reason();
    let mut stock_to_insert = Vec::with_capacity(item_ids.len());
    let mut ledger = Vec::with_capacity(item_ids.len());

    for id in item_ids {
        let total = totals.get(id).copied().unwrap_or(0);
        if total > 0 {
            stock_to_insert.push(StockRecord::new(*id, ctx.target_location_id, total));
        }
        ledger.push(InventoryTransaction {
            id: TransactionId::new(),
            tenant_id: ctx.tenant_id,
            item_id: *id,
            change_amount: total,
            kind: TransactionKind::Transfer,
            reason: reason.clone(),
            storage_location_id: Some(ctx.target_location_id),
            created_by: ctx.actor,
            created_at: ctx.now,
        });
    }

    Ok(MovePlan {
        item_ids: item_ids.to_vec(),
        stock_to_insert,
        ledger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx<'a>(target: StorageLocationId, name: &'a str, reason: &'a Reason) -> MoveContext<'a> {
        MoveContext {
            tenant_id: TenantId::new(),
            target_location_id: target,
            target_location_name: name,
            reason,
            actor: UserId::new(),
            now: Utc::now(),
        }
    }

    #[test]
    fn consolidates_and_records_zero_stock_items() {
        let a = ItemId::new();
        let b = ItemId::new();
        let (x, y, z) = (StorageLocationId::new(), StorageLocationId::new(), StorageLocationId::new());
        let reason = Reason::optional("reason", "").unwrap();
        let current = vec![StockRecord::new(a, x, 3), StockRecord::new(a, y, 2)];

        let plan = MoveStrategy::ConsolidateAll
            .plan(&[a, b], &current, &ctx(z, "Bay Z", &reason))
            .unwrap();

        assert_eq!(plan.stock_to_insert, vec![StockRecord::new(a, z, 5)]);
        assert_eq!(plan.ledger.len(), 2);
        assert_eq!(plan.ledger[0].change_amount, 5);
        assert_eq!(plan.ledger[1].change_amount, 0);
        assert!(plan.ledger.iter().all(|t| t.kind == TransactionKind::Transfer));
        assert!(plan.ledger.iter().all(|t| t.storage_location_id == Some(z)));
    }

    #[test]
    fn ledger_reason_embeds_location_name() {
        let z = StorageLocationId::new();
        let empty = Reason::optional("reason", "  ").unwrap();
        let note = Reason::optional("reason", "cycle count").unwrap();

        assert_eq!(ctx(z, "Cold room", &empty).ledger_reason(), "Moved to Cold room");
        assert_eq!(ctx(z, "Cold room", &note).ledger_reason(), "Moved to Cold room: cycle count");
    }

    #[test]
    fn overflowing_total_is_an_invariant_error() {
        let a = ItemId::new();
        let z = StorageLocationId::new();
        let reason = Reason::optional("reason", "").unwrap();
        let current = vec![
            StockRecord::new(a, StorageLocationId::new(), i64::MAX),
            StockRecord::new(a, StorageLocationId::new(), 1),
        ];

        let err = MoveStrategy::ConsolidateAll
            .plan(&[a], &current, &ctx(z, "Z", &reason))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    proptest! {
        #[test]
        fn move_conserves_stock(rows in prop::collection::vec((0usize..4, 0usize..5, 0i64..10_000), 0..40)) {
            let items: Vec<ItemId> = (0..4).map(|_| ItemId::new()).collect();
            let locations: Vec<StorageLocationId> = (0..5).map(|_| StorageLocationId::new()).collect();
            let current: Vec<StockRecord> = rows
                .iter()
                .map(|(i, l, q)| StockRecord::new(items[*i], locations[*l], *q))
                .collect();
            let before: i64 = current.iter().map(|r| r.quantity).sum();

            let target = StorageLocationId::new();
            let reason = Reason::optional("reason", "").unwrap();
            let plan = MoveStrategy::ConsolidateAll
                .plan(&items, &current, &ctx(target, "T", &reason))
                .unwrap();

            prop_assert_eq!(plan.total_quantity(), before);
            prop_assert_eq!(plan.ledger.len(), items.len());
            prop_assert!(plan.stock_to_insert.len() <= items.len());
            prop_assert!(plan.stock_to_insert.iter().all(|r| r.quantity > 0 && r.storage_location_id == target));
            for id in &items {
                let item_before: i64 = current.iter().filter(|r| r.item_id == *id).map(|r| r.quantity).sum();
                let entry = plan.ledger.iter().find(|t| t.item_id == *id).unwrap();
                prop_assert_eq!(entry.change_amount, item_before);
            }
        }
    }
}
