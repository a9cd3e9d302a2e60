use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::{CategoryId, Entity, ItemId, TenantId, UserId};

/// A catalog entry in the warehouse (SKU-level inventory record).
///
/// `quantity` is a denormalised total maintained by item edits; the per-location
/// truth lives in [`crate::StockRecord`] rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub tenant_id: TenantId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub quantity: i64,
    pub reserved_quantity: i64,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub archive_reason: Option<String>,
    pub archived_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who archived an item, when, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveStamp {
    pub reason: String,
    pub archived_at: DateTime<Utc>,
    pub archived_by: UserId,
}

impl InventoryItem {
    /// A fresh, active item with no category and zero quantity.
    pub fn new(tenant_id: TenantId, sku: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            tenant_id,
            sku: sku.into(),
            name: name.into(),
            description: None,
            category_id: None,
            quantity: 0,
            reserved_quantity: 0,
            is_archived: false,
            archived_at: None,
            archive_reason: None,
            archived_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark archived. Re-archiving overwrites the previous stamp.
    pub fn archive(&mut self, stamp: &ArchiveStamp) {
        self.is_archived = true;
        self.archive_reason = Some(stamp.reason.clone());
        self.archived_at = Some(stamp.archived_at);
        self.archived_by = Some(stamp.archived_by);
        self.updated_at = stamp.archived_at;
    }

    /// Clear every archive field.
    pub fn restore(&mut self, now: DateTime<Utc>) {
        self.is_archived = false;
        self.archive_reason = None;
        self.archived_at = None;
        self.archived_by = None;
        self.updated_at = now;
    }

    pub fn recategorize(&mut self, category_id: CategoryId, now: DateTime<Utc>) {
        self.category_id = Some(category_id);
        self.updated_at = now;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn available_quantity(&self) -> i64 {
        self.quantity - self.reserved_quantity
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item() -> InventoryItem {
        InventoryItem::new(TenantId::new(), "SKU-1", "Pallet jack", Utc::now())
    }

    #[test]
    fn archive_twice_overwrites_stamp() {
        let mut it = item();
        let actor = UserId::new();
        let t0 = Utc::now();

        it.archive(&ArchiveStamp {
            reason: "seasonal".into(),
            archived_at: t0,
            archived_by: actor,
        });
        it.archive(&ArchiveStamp {
            reason: "discontinued".into(),
            archived_at: t0 + Duration::seconds(5),
            archived_by: actor,
        });

        assert!(it.is_archived);
        assert_eq!(it.archive_reason.as_deref(), Some("discontinued"));
        assert_eq!(it.archived_at, Some(t0 + Duration::seconds(5)));
    }

    #[test]
    fn restore_clears_all_archive_fields() {
        let mut it = item();
        it.archive(&ArchiveStamp {
            reason: "damaged".into(),
            archived_at: Utc::now(),
            archived_by: UserId::new(),
        });
        it.restore(Utc::now());

        assert!(!it.is_archived);
        assert_eq!(it.archive_reason, None);
        assert_eq!(it.archived_at, None);
        assert_eq!(it.archived_by, None);
    }

    #[test]
    fn available_quantity_subtracts_reservations() {
        let mut it = item();
        it.quantity = 10;
        it.reserved_quantity = 3;
        assert_eq!(it.available_quantity(), 7);
    }
}
