use serde::{Deserialize, Serialize};

use wareflow_core::{CategoryId, Entity, ItemId, StorageLocationId, TenantId};

/// Quantity of one item at one storage location.
///
/// At most one record exists per `(item_id, storage_location_id)`; a missing
/// record means the location holds none of the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub item_id: ItemId,
    pub storage_location_id: StorageLocationId,
    pub quantity: i64,
}

impl StockRecord {
    pub fn new(item_id: ItemId, storage_location_id: StorageLocationId, quantity: i64) -> Self {
        Self {
            item_id,
            storage_location_id,
            quantity,
        }
    }
}

/// Named destination for stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub id: StorageLocationId,
    pub tenant_id: TenantId,
    pub name: String,
    pub is_active: bool,
}

impl StorageLocation {
    pub fn new(tenant_id: TenantId, name: impl Into<String>) -> Self {
        Self {
            id: StorageLocationId::new(),
            tenant_id,
            name: name.into(),
            is_active: true,
        }
    }
}

impl Entity for StorageLocation {
    type Id = StorageLocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub tenant_id: TenantId,
    pub name: String,
}

impl Category {
    pub fn new(tenant_id: TenantId, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            tenant_id,
            name: name.into(),
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
