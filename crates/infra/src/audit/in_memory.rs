use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use wareflow_core::TenantId;

use super::{AuditEntry, AuditError, AuditSink, MAX_AUDIT_PAGE};

/// In-memory audit sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    entries: RwLock<Vec<AuditEntry>>,
    unavailable: AtomicBool,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every `record` call fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// All entries in write order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuditError::Unavailable("in-memory sink switched off".to_string()));
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuditError::Backend("audit lock poisoned".to_string()))?;
        entries.push(entry);
        Ok(())
    }

    async fn recent(&self, tenant_id: TenantId, limit: usize) -> Result<Vec<AuditEntry>, AuditError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AuditError::Backend("audit lock poisoned".to_string()))?;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| e.tenant_id == tenant_id)
            .take(limit.min(MAX_AUDIT_PAGE))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wareflow_core::UserId;

    #[tokio::test]
    async fn recent_is_tenant_scoped_and_newest_first() {
        let sink = InMemoryAuditSink::new();
        let (t1, t2, actor) = (TenantId::new(), TenantId::new(), UserId::new());

        sink.record(AuditEntry::new(t1, actor, "first", Utc::now())).await.unwrap();
        sink.record(AuditEntry::new(t2, actor, "other", Utc::now())).await.unwrap();
        sink.record(AuditEntry::new(t1, actor, "second", Utc::now())).await.unwrap();

        let recent = sink.recent(t1, 10).await.unwrap();
        let actions: Vec<&str> = recent.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, ["second", "first"]);
    }

    #[tokio::test]
    async fn unavailable_sink_rejects_writes() {
        let sink = InMemoryAuditSink::new();
        sink.set_unavailable(true);
        let err = sink
            .record(AuditEntry::new(TenantId::new(), UserId::new(), "x", Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::Unavailable(_)));
        assert!(sink.entries().is_empty());
    }
}
