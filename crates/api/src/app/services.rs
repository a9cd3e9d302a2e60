//! Service wiring: Postgres when a database is configured, in-memory otherwise.

use std::sync::Arc;

use wareflow_infra::db;
use wareflow_infra::seed::seed_demo;
use wareflow_infra::{
    AppConfig, AuditSink, InMemoryAuditSink, InMemoryInventoryStore, InventoryConsistencyService, InventoryStore,
    PostgresAuditSink, PostgresInventoryStore, StoreError,
};

pub type DynInventoryService = InventoryConsistencyService<Arc<dyn InventoryStore>, Arc<dyn AuditSink>>;

pub struct AppServices {
    pub inventory: DynInventoryService,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            inventory: InventoryConsistencyService::new(store, audit),
        }
    }

    pub fn store(&self) -> &dyn InventoryStore {
        self.inventory.store().as_ref()
    }

    pub fn audit(&self) -> &dyn AuditSink {
        self.inventory.audit().as_ref()
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    match &config.database {
        Some(database) => {
            let pool = db::connect(database).await?;
            tracing::info!(max_connections = database.max_connections, "using postgres inventory store");
            Ok(AppServices::new(
                Arc::new(PostgresInventoryStore::new(pool.clone())),
                Arc::new(PostgresAuditSink::new(pool)),
            ))
        }
        None => {
            let store = InMemoryInventoryStore::new();
            if config.seed_demo {
                seed_demo(&store)?;
            }
            tracing::warn!("DATABASE_URL not set; using in-memory inventory store");
            Ok(AppServices::new(Arc::new(store), Arc::new(InMemoryAuditSink::new())))
        }
    }
}
