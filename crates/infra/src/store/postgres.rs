//! Postgres-backed inventory store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Constraint` |
//! | Database (foreign key violation) | `23503` | `Constraint` |
//! | Database (check constraint violation) | `23514` | `Constraint` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / RowNotFound / Other | N/A | `Backend` |
//!
//! ## Concurrency
//!
//! `move_items` locks the batch's item rows (`FOR UPDATE`, in id order) before
//! reading stock, so overlapping moves serialise instead of overwriting each
//! other's consolidated totals. Dependent stock and ledger rows disappear with
//! their item through `ON DELETE CASCADE`.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::{instrument, Span};
use uuid::Uuid;

use wareflow_core::{CategoryId, ItemId, StorageLocationId, TenantId, TransactionId, UserId};
use wareflow_inventory::{
    ArchiveStamp, InventoryItem, InventoryTransaction, MoveContext, StockRecord, StorageLocation, TransactionKind,
};

use super::{InventoryStore, ItemFilter, MoveExecution, MoveOutcome, StoreError};

/// Schema for items, stock, ledger and audit log. Idempotent.
pub const SCHEMA_SQL: &str = include_str!("../../migrations/0001_inventory.sql");

#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: Arc<PgPool>,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Apply [`SCHEMA_SQL`].
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    async fn update_returning(
        &self,
        operation: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
        ids: &[ItemId],
    ) -> Result<Vec<ItemId>, StoreError> {
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        let returned = returned_ids(&rows)?;
        Ok(in_request_order(ids, &returned))
    }
}

#[async_trait::async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self, ids, stamp), fields(tenant_id = %tenant_id, requested = ids.len(), affected), err)]
    async fn archive_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        stamp: &ArchiveStamp,
    ) -> Result<Vec<ItemId>, StoreError> {
        let uuids = to_uuids(ids);
        let query = sqlx::query(
            r#"
            UPDATE inventory_items
            SET is_archived = TRUE,
                archive_reason = $3,
                archived_at = $4,
                archived_by = $5,
                updated_at = $4
            WHERE tenant_id = $1 AND id = ANY($2)
            RETURNING id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(&uuids)
        .bind(&stamp.reason)
        .bind(stamp.archived_at)
        .bind(stamp.archived_by.as_uuid());

        let affected = self.update_returning("archive_items", query, ids).await?;
        Span::current().record("affected", affected.len());
        Ok(affected)
    }

    #[instrument(skip(self, ids), fields(tenant_id = %tenant_id, requested = ids.len(), affected), err)]
    async fn restore_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError> {
        let uuids = to_uuids(ids);
        let query = sqlx::query(
            r#"
            UPDATE inventory_items
            SET is_archived = FALSE,
                archive_reason = NULL,
                archived_at = NULL,
                archived_by = NULL,
                updated_at = $3
            WHERE tenant_id = $1 AND id = ANY($2)
            RETURNING id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(&uuids)
        .bind(now);

        let affected = self.update_returning("restore_items", query, ids).await?;
        Span::current().record("affected", affected.len());
        Ok(affected)
    }

    #[instrument(skip(self, ids), fields(tenant_id = %tenant_id, category_id = %category_id, requested = ids.len()), err)]
    async fn recategorize_items(
        &self,
        tenant_id: TenantId,
        ids: &[ItemId],
        category_id: CategoryId,
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemId>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let category = sqlx::query("SELECT id FROM categories WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id.as_uuid())
            .bind(category_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("load_category", e))?;
        if category.is_none() {
            tx.rollback().await.map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(StoreError::CategoryNotFound(category_id));
        }

        let rows = sqlx::query(
            r#"
            UPDATE inventory_items
            SET category_id = $3, updated_at = $4
            WHERE tenant_id = $1 AND id = ANY($2)
            RETURNING id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(to_uuids(ids))
        .bind(category_id.as_uuid())
        .bind(now)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("recategorize_items", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(in_request_order(ids, &returned_ids(&rows)?))
    }

    #[instrument(skip(self, ids), fields(tenant_id = %tenant_id, requested = ids.len()), err)]
    async fn items_by_ids(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<InventoryItem>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE tenant_id = $1 AND id = ANY($2)"
        ))
        .bind(tenant_id.as_uuid())
        .bind(to_uuids(ids))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("items_by_ids", e))?;

        let mut items = decode_items(&rows)?;
        items.sort_by_key(|item| ids.iter().position(|id| *id == item.id));
        Ok(items)
    }

    #[instrument(skip(self, ids), fields(tenant_id = %tenant_id, requested = ids.len(), affected), err)]
    async fn delete_items(&self, tenant_id: TenantId, ids: &[ItemId]) -> Result<Vec<ItemId>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let rows = sqlx::query("DELETE FROM inventory_items WHERE tenant_id = $1 AND id = ANY($2) RETURNING id")
            .bind(tenant_id.as_uuid())
            .bind(to_uuids(ids))
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("delete_items", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        let affected = in_request_order(ids, &returned_ids(&rows)?);
        Span::current().record("affected", affected.len());
        Ok(affected)
    }

    #[instrument(
        skip(self, execution),
        fields(
            tenant_id = %tenant_id,
            target_location_id = %execution.target_location_id,
            requested = execution.item_ids.len(),
            stock_rows_written,
            ledger_entries_written
        ),
        err
    )]
    async fn move_items(&self, tenant_id: TenantId, execution: MoveExecution<'_>) -> Result<MoveOutcome, StoreError> {
        let span = Span::current();
        let uuids = to_uuids(execution.item_ids);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let locked = sqlx::query(
            r#"
            SELECT id FROM inventory_items
            WHERE tenant_id = $1 AND id = ANY($2)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(&uuids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("lock_items", e))?;

        let locked: HashSet<ItemId> = returned_ids(&locked)?.into_iter().collect();
        if let Some(missing) = execution.item_ids.iter().find(|id| !locked.contains(id)) {
            tx.rollback().await.map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(StoreError::ItemNotFound(*missing));
        }

        let location = sqlx::query("SELECT name FROM storage_locations WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id.as_uuid())
            .bind(execution.target_location_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("resolve_location", e))?;
        let target_location_name: String = match location {
            Some(row) => row.try_get("name").map_err(|e| map_sqlx_error("resolve_location", e))?,
            None => {
                tx.rollback().await.map_err(|e| map_sqlx_error("rollback", e))?;
                return Err(StoreError::LocationNotFound(execution.target_location_id));
            }
        };

        let stock_rows = sqlx::query(
            "SELECT item_id, storage_location_id, quantity FROM inventory_stock WHERE item_id = ANY($1)",
        )
        .bind(&uuids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("read_stock", e))?;
        let current = stock_rows
            .iter()
            .map(|row| StockRow::from_row(row).map(StockRecord::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("read_stock", e))?;

        let ctx = MoveContext {
            tenant_id,
            target_location_id: execution.target_location_id,
            target_location_name: &target_location_name,
            reason: execution.reason,
            actor: execution.actor,
            now: execution.now,
        };
        // Dropping `tx` on error rolls back.
        let plan = execution.strategy.plan(execution.item_ids, &current, &ctx)?;

        sqlx::query("DELETE FROM inventory_stock WHERE item_id = ANY($1)")
            .bind(&uuids)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("delete_stock", e))?;

        for row in &plan.stock_to_insert {
            sqlx::query("INSERT INTO inventory_stock (item_id, storage_location_id, quantity) VALUES ($1, $2, $3)")
                .bind(row.item_id.as_uuid())
                .bind(row.storage_location_id.as_uuid())
                .bind(row.quantity)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("insert_stock", e))?;
        }

        for entry in &plan.ledger {
            sqlx::query(
                r#"
                INSERT INTO inventory_transactions (
                    id, tenant_id, item_id, change_amount, kind, reason,
                    storage_location_id, created_by, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(entry.id.as_uuid())
            .bind(entry.tenant_id.as_uuid())
            .bind(entry.item_id.as_uuid())
            .bind(entry.change_amount)
            .bind(entry.kind.as_str())
            .bind(&entry.reason)
            .bind(entry.storage_location_id.map(|id| *id.as_uuid()))
            .bind(entry.created_by.as_uuid())
            .bind(entry.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert_transaction", e))?;
        }

        sqlx::query("UPDATE inventory_items SET updated_at = $3 WHERE tenant_id = $1 AND id = ANY($2)")
            .bind(tenant_id.as_uuid())
            .bind(&uuids)
            .bind(execution.now)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("touch_items", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        span.record("stock_rows_written", plan.stock_to_insert.len());
        span.record("ledger_entries_written", plan.ledger.len());

        Ok(MoveOutcome {
            stock_rows_written: plan.stock_to_insert.len(),
            ledger_entries_written: plan.ledger.len(),
            item_ids: plan.item_ids,
            target_location_name,
        })
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id), err)]
    async fn list_items(&self, tenant_id: TenantId, filter: ItemFilter) -> Result<Vec<InventoryItem>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE tenant_id = $1 AND is_archived = $2 ORDER BY sku"
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.archived)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_items", e))?;

        decode_items(&rows)
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, item_id = %id), err)]
    async fn get_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_item", e))?;

        match row {
            Some(r) => {
                let item = ItemRow::from_row(&r).map_err(|e| map_sqlx_error("get_item", e))?;
                Ok(Some(item.into()))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, item_id = %id), err)]
    async fn stock_for_item(&self, tenant_id: TenantId, id: ItemId) -> Result<Vec<StockRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT s.item_id, s.storage_location_id, s.quantity
            FROM inventory_stock s
            JOIN inventory_items i ON i.id = s.item_id
            WHERE i.tenant_id = $1 AND s.item_id = $2
            ORDER BY s.storage_location_id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("stock_for_item", e))?;

        rows.iter()
            .map(|row| StockRow::from_row(row).map(StockRecord::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("stock_for_item", e))
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, item_id = %id), err)]
    async fn transactions_for_item(
        &self,
        tenant_id: TenantId,
        id: ItemId,
    ) -> Result<Vec<InventoryTransaction>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, tenant_id, item_id, change_amount, kind, reason,
                   storage_location_id, created_by, created_at
            FROM inventory_transactions
            WHERE tenant_id = $1 AND item_id = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("transactions_for_item", e))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let row = TransactionRow::from_row(row).map_err(|e| map_sqlx_error("transactions_for_item", e))?;
            entries.push(InventoryTransaction::try_from(row)?);
        }
        Ok(entries)
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id), err)]
    async fn list_locations(&self, tenant_id: TenantId) -> Result<Vec<StorageLocation>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, tenant_id, name, is_active FROM storage_locations WHERE tenant_id = $1 ORDER BY name",
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_locations", e))?;

        rows.iter()
            .map(|row| -> Result<StorageLocation, sqlx::Error> {
                Ok(StorageLocation {
                    id: StorageLocationId::from_uuid(row.try_get("id")?),
                    tenant_id: TenantId::from_uuid(row.try_get("tenant_id")?),
                    name: row.try_get("name")?,
                    is_active: row.try_get("is_active")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| map_sqlx_error("list_locations", e))
    }
}

/// Map SQLx errors to `StoreError`, keeping the failing operation in the message.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") | Some("23503") | Some("23514") => StoreError::Constraint(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => StoreError::Backend(format!("connection pool closed in {}", operation)),
        sqlx::Error::RowNotFound => StoreError::Backend(format!("unexpected row not found in {}", operation)),
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

fn to_uuids(ids: &[ItemId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

fn returned_ids(rows: &[PgRow]) -> Result<Vec<ItemId>, StoreError> {
    rows.iter()
        .map(|row| row.try_get::<Uuid, _>("id").map(ItemId::from_uuid))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| map_sqlx_error("decode_returned_ids", e))
}

/// `returned` filtered back into the order the caller asked for.
fn in_request_order(requested: &[ItemId], returned: &[ItemId]) -> Vec<ItemId> {
    let returned: HashSet<&ItemId> = returned.iter().collect();
    requested.iter().filter(|id| returned.contains(id)).copied().collect()
}

fn decode_items(rows: &[PgRow]) -> Result<Vec<InventoryItem>, StoreError> {
    rows.iter()
        .map(|row| ItemRow::from_row(row).map(InventoryItem::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| map_sqlx_error("decode_item", e))
}

// SQLx row types

const ITEM_COLUMNS: &str = "id, tenant_id, sku, name, description, category_id, quantity, reserved_quantity, \
     is_archived, archived_at, archive_reason, archived_by, created_at, updated_at";

#[derive(Debug)]
struct ItemRow {
    id: Uuid,
    tenant_id: Uuid,
    sku: String,
    name: String,
    description: Option<String>,
    category_id: Option<Uuid>,
    quantity: i64,
    reserved_quantity: i64,
    is_archived: bool,
    archived_at: Option<DateTime<Utc>>,
    archive_reason: Option<String>,
    archived_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for ItemRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ItemRow {
            id: row.try_get("id")?,
            tenant_id: row.try_get("tenant_id")?,
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category_id: row.try_get("category_id")?,
            quantity: row.try_get("quantity")?,
            reserved_quantity: row.try_get("reserved_quantity")?,
            is_archived: row.try_get("is_archived")?,
            archived_at: row.try_get("archived_at")?,
            archive_reason: row.try_get("archive_reason")?,
            archived_by: row.try_get("archived_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<ItemRow> for InventoryItem {
    fn from(row: ItemRow) -> Self {
        InventoryItem {
            id: ItemId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            sku: row.sku,
            name: row.name,
            description: row.description,
            category_id: row.category_id.map(CategoryId::from_uuid),
            quantity: row.quantity,
            reserved_quantity: row.reserved_quantity,
            is_archived: row.is_archived,
            archived_at: row.archived_at,
            archive_reason: row.archive_reason,
            archived_by: row.archived_by.map(UserId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug)]
struct StockRow {
    item_id: Uuid,
    storage_location_id: Uuid,
    quantity: i64,
}

impl<'r> sqlx::FromRow<'r, PgRow> for StockRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(StockRow {
            item_id: row.try_get("item_id")?,
            storage_location_id: row.try_get("storage_location_id")?,
            quantity: row.try_get("quantity")?,
        })
    }
}

impl From<StockRow> for StockRecord {
    fn from(row: StockRow) -> Self {
        StockRecord::new(
            ItemId::from_uuid(row.item_id),
            StorageLocationId::from_uuid(row.storage_location_id),
            row.quantity,
        )
    }
}

#[derive(Debug)]
struct TransactionRow {
    id: Uuid,
    tenant_id: Uuid,
    item_id: Uuid,
    change_amount: i64,
    kind: String,
    reason: String,
    storage_location_id: Option<Uuid>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for TransactionRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(TransactionRow {
            id: row.try_get("id")?,
            tenant_id: row.try_get("tenant_id")?,
            item_id: row.try_get("item_id")?,
            change_amount: row.try_get("change_amount")?,
            kind: row.try_get("kind")?,
            reason: row.try_get("reason")?,
            storage_location_id: row.try_get("storage_location_id")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl TryFrom<TransactionRow> for InventoryTransaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let kind: TransactionKind = row
            .kind
            .parse()
            .map_err(|e| StoreError::Backend(format!("unexpected ledger row: {e}")))?;
        Ok(InventoryTransaction {
            id: TransactionId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            item_id: ItemId::from_uuid(row.item_id),
            change_amount: row.change_amount,
            kind,
            reason: row.reason,
            storage_location_id: row.storage_location_id.map(StorageLocationId::from_uuid),
            created_by: UserId::from_uuid(row.created_by),
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_order_is_preserved_and_missing_ids_dropped() {
        let (a, b, c) = (ItemId::new(), ItemId::new(), ItemId::new());
        assert_eq!(in_request_order(&[a, b, c], &[c, a]), vec![a, c]);
    }

    #[test]
    fn schema_declares_cascading_dependents() {
        assert!(SCHEMA_SQL.contains("REFERENCES inventory_items (id) ON DELETE CASCADE"));
        assert_eq!(SCHEMA_SQL.matches("ON DELETE CASCADE").count(), 2);
    }

    #[test]
    fn non_database_errors_map_to_backend() {
        assert!(matches!(
            map_sqlx_error("list_items", sqlx::Error::PoolClosed),
            StoreError::Backend(msg) if msg.contains("list_items")
        ));
    }
}
