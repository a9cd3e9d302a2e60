use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use wareflow_core::{AuditEntryId, TenantId, UserId};

use super::{AuditEntry, AuditError, AuditSink, MAX_AUDIT_PAGE};

/// Audit sink writing to the `audit_log` table.
#[derive(Debug, Clone)]
pub struct PostgresAuditSink {
    pool: Arc<PgPool>,
}

impl PostgresAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }
}

#[async_trait::async_trait]
impl AuditSink for PostgresAuditSink {
    #[instrument(skip(self, entry), fields(tenant_id = %entry.tenant_id, action = %entry.action), err)]
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (id, tenant_id, actor_id, action, resource_type, resource_ids, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.tenant_id.as_uuid())
        .bind(entry.actor_id.as_uuid())
        .bind(&entry.action)
        .bind(&entry.resource_type)
        .bind(&entry.resource_ids)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id), err)]
    async fn recent(&self, tenant_id: TenantId, limit: usize) -> Result<Vec<AuditEntry>, AuditError> {
        let limit = limit.min(MAX_AUDIT_PAGE) as i64;
        let rows = sqlx::query(
            r#"
            SELECT id, tenant_id, actor_id, action, resource_type, resource_ids, details, created_at
            FROM audit_log
            WHERE tenant_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(limit)
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| -> Result<AuditEntry, sqlx::Error> {
                Ok(AuditEntry {
                    id: AuditEntryId::from_uuid(row.try_get::<Uuid, _>("id")?),
                    tenant_id: TenantId::from_uuid(row.try_get::<Uuid, _>("tenant_id")?),
                    actor_id: UserId::from_uuid(row.try_get::<Uuid, _>("actor_id")?),
                    action: row.try_get("action")?,
                    resource_type: row.try_get("resource_type")?,
                    resource_ids: row.try_get("resource_ids")?,
                    details: row.try_get("details")?,
                    created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlx_error)
    }
}

fn map_sqlx_error(err: sqlx::Error) -> AuditError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            AuditError::Unavailable(err.to_string())
        }
        other => AuditError::Backend(other.to_string()),
    }
}
