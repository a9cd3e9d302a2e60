//! Inventory domain module.
//!
//! Business rules for items, per-location stock and the transaction ledger,
//! implemented as deterministic domain logic (no IO, no HTTP, no storage).
//! Storage backends execute what this crate decides.

pub mod bulk;
pub mod item;
pub mod ledger;
pub mod movement;
pub mod policy;
pub mod stock;

pub use bulk::{
    ArchiveItems, ArchiveRequest, BulkOperation, DeleteItems, DeleteRequest, MoveItems, MoveRequest,
    Reason, RecategorizeItems, RecategorizeRequest, RestoreItems, RestoreRequest, MAX_BATCH_SIZE,
    MAX_REASON_LEN,
};
pub use item::{ArchiveStamp, InventoryItem};
pub use ledger::{InventoryTransaction, TransactionKind};
pub use movement::{MoveContext, MovePlan, MoveStrategy};
pub use policy::INVENTORY_POLICY;
pub use stock::{Category, StockRecord, StorageLocation};
