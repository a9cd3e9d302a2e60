//! Audit trail of administrative actions.
//!
//! One entry per bulk operation, never one per item. Entries are append-only.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use wareflow_core::{AuditEntryId, TenantId, UserId};

pub use in_memory::InMemoryAuditSink;
pub use postgres::PostgresAuditSink;

/// Upper bound for `recent()` page sizes.
pub const MAX_AUDIT_PAGE: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub tenant_id: TenantId,
    pub actor_id: UserId,
    pub action: String,
    pub resource_type: String,
    pub resource_ids: Vec<Uuid>,
    pub details: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(tenant_id: TenantId, actor_id: UserId, action: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: AuditEntryId::new(),
            tenant_id,
            actor_id,
            action: action.into(),
            resource_type: String::new(),
            resource_ids: Vec::new(),
            details: JsonValue::Object(Default::default()),
            created_at,
        }
    }

    pub fn for_resources<I>(mut self, resource_type: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Uuid>,
    {
        self.resource_type = resource_type.into();
        self.resource_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = details;
        self
    }
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),

    #[error("audit backend error: {0}")]
    Backend(String),
}

/// Destination for audit entries.
#[async_trait::async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;

    /// Most recent entries of a tenant, newest first, at most `limit`.
    async fn recent(&self, tenant_id: TenantId, limit: usize) -> Result<Vec<AuditEntry>, AuditError>;
}

#[async_trait::async_trait]
impl<S> AuditSink for Arc<S>
where
    S: AuditSink + ?Sized,
{
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        (**self).record(entry).await
    }

    async fn recent(&self, tenant_id: TenantId, limit: usize) -> Result<Vec<AuditEntry>, AuditError> {
        (**self).recent(tenant_id, limit).await
    }
}
