//! Demo data for the in-memory store.

use chrono::Utc;
use uuid::Uuid;

use wareflow_core::{ItemId, StorageLocationId, TenantId};
use wareflow_inventory::{Category, InventoryItem, StorageLocation};

use crate::store::{InMemoryInventoryStore, StoreError};

const DEMO_TENANT: Uuid = Uuid::from_u128(0x0192_0000_0000_7000_8000_0000_0000_0001);

/// Fixed tenant the demo data is seeded into, so dev tokens can target it.
pub fn demo_tenant_id() -> TenantId {
    TenantId::from_uuid(DEMO_TENANT)
}

/// What [`seed_demo`] created.
#[derive(Debug, Clone)]
pub struct DemoSeed {
    pub tenant_id: TenantId,
    pub locations: Vec<StorageLocationId>,
    pub items: Vec<ItemId>,
}

/// Three locations, two categories, four items with scattered stock.
pub fn seed_demo(store: &InMemoryInventoryStore) -> Result<DemoSeed, StoreError> {
    let tenant_id = demo_tenant_id();
    let now = Utc::now();

    let locations: Vec<StorageLocation> = ["Receiving dock", "Aisle 1", "Cold room"]
        .into_iter()
        .map(|name| StorageLocation::new(tenant_id, name))
        .collect();
    for location in &locations {
        store.add_location(location.clone())?;
    }

    let tools = Category::new(tenant_id, "Tools");
    store.add_category(tools.clone())?;
    store.add_category(Category::new(tenant_id, "Consumables"))?;

    let catalog: [(&str, &str, &[(usize, i64)]); 4] = [
        ("PJ-100", "Pallet jack", &[(0, 2), (1, 1)]),
        ("TS-250", "Tape, 50m", &[(1, 40)]),
        ("GL-M", "Gloves, medium", &[(0, 12), (1, 30), (2, 5)]),
        ("LBL-4X6", "Shipping labels 4x6", &[]),
    ];

    let mut items = Vec::with_capacity(catalog.len());
    for (sku, name, stock) in catalog {
        let mut item = InventoryItem::new(tenant_id, sku, name, now);
        if sku.starts_with("PJ") {
            item.category_id = Some(tools.id);
        }
        let id = item.id;
        store.add_item(item)?;
        for (location, quantity) in stock {
            store.set_stock(tenant_id, id, locations[*location].id, *quantity)?;
        }
        items.push(id);
    }

    tracing::info!(tenant_id = %tenant_id, items = items.len(), "seeded demo inventory");

    Ok(DemoSeed {
        tenant_id,
        locations: locations.iter().map(|l| l.id).collect(),
        items,
    })
}
