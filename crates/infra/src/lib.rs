//! Infrastructure layer: storage, audit trail, configuration and the bulk
//! inventory service that ties them together.

pub mod audit;
pub mod config;
pub mod db;
pub mod seed;
pub mod service;
pub mod store;

pub use audit::{AuditEntry, AuditError, AuditSink, InMemoryAuditSink, PostgresAuditSink};
pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use service::{ActionResult, BulkError, BulkSummary, FailureKind, InventoryConsistencyService};
pub use store::{InMemoryInventoryStore, InventoryStore, ItemFilter, PostgresInventoryStore, StoreError};
