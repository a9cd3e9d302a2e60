//! Postgres store checks. Run with a scratch database:
//!
//! `DATABASE_URL=postgres://... cargo test -p wareflow-infra --test postgres_store -- --ignored`
//!
//! Every test works in a fresh tenant, so runs do not interfere.

use chrono::Utc;
use sqlx::PgPool;

use wareflow_auth::{Principal, Role};
use wareflow_core::{ItemId, StorageLocationId, TenantId, UserId};
use wareflow_infra::{
    db, DatabaseConfig, InventoryConsistencyService, InventoryStore, PostgresAuditSink, PostgresInventoryStore,
};
use wareflow_inventory::{MoveRequest, TransactionKind};

const LEDGER_TRAP_TAG: &str = "reject-ledger-insert";

static SCHEMA_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

async fn pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping");
            return None;
        }
    };
    let config = DatabaseConfig {
        url,
        max_connections: 4,
    };
    // Concurrent `CREATE TABLE IF NOT EXISTS` can collide in the catalog.
    let _guard = SCHEMA_LOCK.lock().await;
    Some(db::connect(&config).await.expect("connect to DATABASE_URL"))
}

struct Scene {
    tenant_id: TenantId,
    a: ItemId,
    b: ItemId,
    x: StorageLocationId,
    y: StorageLocationId,
    z: StorageLocationId,
}

/// A {X:3, Y:2}, B {} in a fresh tenant, locations X, Y, Z.
async fn scene(pool: &PgPool) -> Scene {
    let tenant_id = TenantId::new();
    let (x, y, z) = (StorageLocationId::new(), StorageLocationId::new(), StorageLocationId::new());
    for (id, name) in [(x, "Bay X"), (y, "Bay Y"), (z, "Bay Z")] {
        sqlx::query("INSERT INTO storage_locations (id, tenant_id, name) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(tenant_id.as_uuid())
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }

    let (a, b) = (ItemId::new(), ItemId::new());
    for (id, sku, quantity) in [(a, "A-1", 5_i64), (b, "B-1", 0)] {
        sqlx::query("INSERT INTO inventory_items (id, tenant_id, sku, name, quantity) VALUES ($1, $2, $3, $3, $4)")
            .bind(id.as_uuid())
            .bind(tenant_id.as_uuid())
            .bind(sku)
            .bind(quantity)
            .execute(pool)
            .await
            .unwrap();
    }
    for (location, quantity) in [(x, 3_i64), (y, 2)] {
        sqlx::query("INSERT INTO inventory_stock (item_id, storage_location_id, quantity) VALUES ($1, $2, $3)")
            .bind(a.as_uuid())
            .bind(location.as_uuid())
            .bind(quantity)
            .execute(pool)
            .await
            .unwrap();
    }

    Scene {
        tenant_id,
        a,
        b,
        x,
        y,
        z,
    }
}

fn move_request(scene: &Scene, reason: &str) -> MoveRequest {
    MoveRequest {
        ids: vec![scene.a.to_string(), scene.b.to_string()],
        target_location_id: scene.z.to_string(),
        reason: reason.to_string(),
    }
}

fn warehouse(scene: &Scene) -> Principal {
    Principal::new(UserId::new(), scene.tenant_id, vec![Role::warehouse()])
}

fn service(pool: &PgPool) -> InventoryConsistencyService<PostgresInventoryStore, PostgresAuditSink> {
    InventoryConsistencyService::new(PostgresInventoryStore::new(pool.clone()), PostgresAuditSink::new(pool.clone()))
}

async fn stock_by_location(
    store: &PostgresInventoryStore,
    tenant_id: TenantId,
    item: ItemId,
) -> Vec<(StorageLocationId, i64)> {
    let mut rows: Vec<_> = store
        .stock_for_item(tenant_id, item)
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.storage_location_id, r.quantity))
        .collect();
    rows.sort();
    rows
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn move_consolidates_into_one_row_and_ledgers_every_item() {
    let Some(pool) = pool().await else { return };
    let scene = scene(&pool).await;
    let service = service(&pool);

    let result = service.bulk_move(&warehouse(&scene), &move_request(&scene, "")).await;
    assert!(result.success, "{result:?}");
    let summary = result.data.unwrap();
    assert_eq!(summary.stock_rows_written, Some(1));
    assert_eq!(summary.ledger_entries_written, Some(2));

    let store = service.store();
    assert_eq!(stock_by_location(store, scene.tenant_id, scene.a).await, vec![(scene.z, 5)]);
    assert!(stock_by_location(store, scene.tenant_id, scene.b).await.is_empty());

    let ledger_a = store.transactions_for_item(scene.tenant_id, scene.a).await.unwrap();
    let ledger_b = store.transactions_for_item(scene.tenant_id, scene.b).await.unwrap();
    assert_eq!(ledger_a.len(), 1);
    assert_eq!(ledger_b.len(), 1);
    assert_eq!(ledger_a[0].kind, TransactionKind::Transfer);
    assert_eq!(ledger_a[0].change_amount, 5);
    assert_eq!(ledger_b[0].change_amount, 0);
    assert_eq!(ledger_a[0].storage_location_id, Some(scene.z));
    assert_eq!(ledger_a[0].reason, "Moved to Bay Z");

    let audit = wareflow_infra::AuditSink::recent(service.audit(), scene.tenant_id, 10)
        .await
        .unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, "inventory.move");
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn failed_ledger_insert_rolls_back_the_whole_move() {
    let Some(pool) = pool().await else { return };
    let scene = scene(&pool).await;

    // Reject ledger rows whose reason carries the tag, after stock rows were
    // already rewritten inside the transaction.
    sqlx::raw_sql(&format!(
        r#"
        CREATE OR REPLACE FUNCTION wareflow_reject_tagged_ledger() RETURNS trigger AS $$
        BEGIN
            IF NEW.reason LIKE '%{LEDGER_TRAP_TAG}%' THEN
                RAISE EXCEPTION 'ledger insert rejected';
            END IF;
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql;

        DROP TRIGGER IF EXISTS wareflow_reject_tagged_ledger ON inventory_transactions;
        CREATE TRIGGER wareflow_reject_tagged_ledger
            BEFORE INSERT ON inventory_transactions
            FOR EACH ROW EXECUTE FUNCTION wareflow_reject_tagged_ledger();
        "#
    ))
    .execute(&pool)
    .await
    .unwrap();

    let service = service(&pool);
    let before_a = service.store().get_item(scene.tenant_id, scene.a).await.unwrap().unwrap();

    let result = service
        .bulk_move(&warehouse(&scene), &move_request(&scene, LEDGER_TRAP_TAG))
        .await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some(wareflow_infra::service::PERSISTENCE_FAILURE_MESSAGE));

    let store = service.store();
    let mut untouched = vec![(scene.x, 3), (scene.y, 2)];
    untouched.sort();
    assert_eq!(stock_by_location(store, scene.tenant_id, scene.a).await, untouched);
    assert!(store.transactions_for_item(scene.tenant_id, scene.a).await.unwrap().is_empty());
    assert!(store.transactions_for_item(scene.tenant_id, scene.b).await.unwrap().is_empty());
    let after_a = store.get_item(scene.tenant_id, scene.a).await.unwrap().unwrap();
    assert_eq!(after_a.updated_at, before_a.updated_at);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn unknown_target_location_changes_nothing() {
    let Some(pool) = pool().await else { return };
    let scene = scene(&pool).await;
    let service = service(&pool);

    let mut request = move_request(&scene, "");
    request.target_location_id = StorageLocationId::new().to_string();
    let result = service.bulk_move(&warehouse(&scene), &request).await;
    assert!(!result.success);

    let stock = stock_by_location(service.store(), scene.tenant_id, scene.a).await;
    assert_eq!(stock.iter().map(|(_, q)| q).sum::<i64>(), 5);
    assert_eq!(stock.len(), 2);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn archive_keeps_reason_verbatim_and_delete_cascades() {
    let Some(pool) = pool().await else { return };
    let scene = scene(&pool).await;
    let service = service(&pool);

    let reason = "  Discontinued by vendor\n";
    let archived = service
        .archive(
            &warehouse(&scene),
            &wareflow_inventory::ArchiveRequest {
                ids: vec![scene.a.to_string()],
                reason: reason.to_string(),
            },
        )
        .await;
    assert!(archived.success, "{archived:?}");
    let item = service.store().get_item(scene.tenant_id, scene.a).await.unwrap().unwrap();
    assert!(item.is_archived);
    assert_eq!(item.archive_reason.as_deref(), Some(reason));
    assert!(item.archived_at.is_some_and(|at| at <= Utc::now()));

    let admin = Principal::new(UserId::new(), scene.tenant_id, vec![Role::admin()]);
    let deleted = service
        .permanent_delete(
            &admin,
            &wareflow_inventory::DeleteRequest {
                ids: vec![scene.a.to_string()],
            },
        )
        .await;
    assert!(deleted.success, "{deleted:?}");
    assert!(service.store().get_item(scene.tenant_id, scene.a).await.unwrap().is_none());
    assert!(stock_by_location(service.store(), scene.tenant_id, scene.a).await.is_empty());
}
