//! Bulk inventory consistency operations.
//!
//! Every entry point runs the same pipeline: validate the raw request,
//! authorize the caller against the policy table, execute against the store,
//! write one audit entry for the batch. Nothing reaches the store before the
//! first two steps pass. Failures come back as an [`ActionResult`]; the
//! detailed error only goes to the log.

pub mod result;


use std::fmt::Debug;

use chrono::Utc;
use serde_json::json;
use tracing::instrument;

use wareflow_auth::{authorize, AuthzError, PolicyTable, Principal};
use wareflow_inventory::{
    ArchiveRequest, ArchiveStamp, BulkOperation, DeleteRequest, MoveRequest, MoveStrategy, RecategorizeRequest,
    RestoreRequest, INVENTORY_POLICY,
};

use crate::audit::{AuditEntry, AuditSink};
use crate::store::{InventoryStore, MoveExecution};

pub use result::{
    ActionResult, BulkError, BulkSummary, FailureKind, FORBIDDEN_MESSAGE, PERSISTENCE_FAILURE_MESSAGE,
};

const ITEM_RESOURCE: &str = "inventory_item";

pub struct InventoryConsistencyService<S, A> {
    store: S,
    audit: A,
    policy: PolicyTable,
    strategy: MoveStrategy,
}

impl<S, A> InventoryConsistencyService<S, A>
where
    S: InventoryStore,
    A: AuditSink,
{
    pub fn new(store: S, audit: A) -> Self {
        Self {
            store,
            audit,
            policy: INVENTORY_POLICY,
            strategy: MoveStrategy::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    #[instrument(skip_all, fields(operation = "inventory.archive", tenant_id = %principal.active_tenant_id))]
    pub async fn archive(&self, principal: &Principal, request: &ArchiveRequest) -> ActionResult<BulkSummary> {
        let result = self.try_archive(principal, request).await;
        conclude(BulkOperation::Archive, principal, request, result)
    }

    #[instrument(skip_all, fields(operation = "inventory.restore", tenant_id = %principal.active_tenant_id))]
    pub async fn restore(&self, principal: &Principal, request: &RestoreRequest) -> ActionResult<BulkSummary> {
        let result = self.try_restore(principal, request).await;
        conclude(BulkOperation::Restore, principal, request, result)
    }

    #[instrument(skip_all, fields(operation = "inventory.delete", tenant_id = %principal.active_tenant_id))]
    pub async fn permanent_delete(&self, principal: &Principal, request: &DeleteRequest) -> ActionResult<BulkSummary> {
        let result = self.try_permanent_delete(principal, request).await;
        conclude(BulkOperation::PermanentDelete, principal, request, result)
    }

    #[instrument(skip_all, fields(operation = "inventory.move", tenant_id = %principal.active_tenant_id))]
    pub async fn bulk_move(&self, principal: &Principal, request: &MoveRequest) -> ActionResult<BulkSummary> {
        let result = self.try_bulk_move(principal, request).await;
        conclude(BulkOperation::Move, principal, request, result)
    }

    #[instrument(skip_all, fields(operation = "inventory.recategorize", tenant_id = %principal.active_tenant_id))]
    pub async fn bulk_recategorize(
        &self,
        principal: &Principal,
        request: &RecategorizeRequest,
    ) -> ActionResult<BulkSummary> {
        let result = self.try_bulk_recategorize(principal, request).await;
        conclude(BulkOperation::Recategorize, principal, request, result)
    }

    async fn try_archive(&self, principal: &Principal, request: &ArchiveRequest) -> Result<BulkSummary, BulkError> {
        let cmd = request.validate()?;
        self.guard(principal, BulkOperation::Archive)?;

        let stamp = ArchiveStamp {
            reason: cmd.reason.as_str().to_string(),
            archived_at: Utc::now(),
            archived_by: principal.principal_id,
        };
        let affected = self
            .store
            .archive_items(principal.active_tenant_id, &cmd.ids, &stamp)
            .await?;

        self.audit_committed(
            entry(principal, BulkOperation::Archive, &affected)
                .with_details(json!({ "requested": cmd.ids.len(), "reason": cmd.reason })),
        )
        .await;
        Ok(BulkSummary::new(BulkOperation::Archive, cmd.ids.len(), affected))
    }

    async fn try_restore(&self, principal: &Principal, request: &RestoreRequest) -> Result<BulkSummary, BulkError> {
        let cmd = request.validate()?;
        self.guard(principal, BulkOperation::Restore)?;

        let affected = self
            .store
            .restore_items(principal.active_tenant_id, &cmd.ids, Utc::now())
            .await?;

        self.audit_committed(
            entry(principal, BulkOperation::Restore, &affected)
                .with_details(json!({ "requested": cmd.ids.len(), "reason": cmd.reason })),
        )
        .await;
        Ok(BulkSummary::new(BulkOperation::Restore, cmd.ids.len(), affected))
    }

    /// The audit entry goes in first and carries a snapshot of what is about
    /// to disappear. If it cannot be written, nothing is deleted.
    async fn try_permanent_delete(
        &self,
        principal: &Principal,
        request: &DeleteRequest,
    ) -> Result<BulkSummary, BulkError> {
        let cmd = request.validate()?;
        self.guard(principal, BulkOperation::PermanentDelete)?;

        let tenant_id = principal.active_tenant_id;
        let doomed = self.store.items_by_ids(tenant_id, &cmd.ids).await?;
        let doomed_ids: Vec<_> = doomed.iter().map(|item| item.id).collect();
        let snapshot: Vec<_> = doomed
            .iter()
            .map(|item| json!({ "id": item.id, "sku": item.sku, "name": item.name }))
            .collect();

        self.audit
            .record(
                entry(principal, BulkOperation::PermanentDelete, &doomed_ids)
                    .with_details(json!({ "requested": cmd.ids.len(), "items": snapshot })),
            )
            .await?;

        let deleted = self.store.delete_items(tenant_id, &doomed_ids).await?;
        Ok(BulkSummary::new(BulkOperation::PermanentDelete, cmd.ids.len(), deleted))
    }

    async fn try_bulk_move(&self, principal: &Principal, request: &MoveRequest) -> Result<BulkSummary, BulkError> {
        let cmd = request.validate()?;
        self.guard(principal, BulkOperation::Move)?;

        let outcome = self
            .store
            .move_items(
                principal.active_tenant_id,
                MoveExecution {
                    strategy: self.strategy,
                    item_ids: &cmd.ids,
                    target_location_id: cmd.target_location_id,
                    reason: &cmd.reason,
                    actor: principal.principal_id,
                    now: Utc::now(),
                },
            )
            .await?;

        self.audit_committed(entry(principal, BulkOperation::Move, &outcome.item_ids).with_details(json!({
            "requested": cmd.ids.len(),
            "target_location_id": cmd.target_location_id,
            "target_location_name": outcome.target_location_name,
            "reason": cmd.reason,
            "stock_rows_written": outcome.stock_rows_written,
            "ledger_entries_written": outcome.ledger_entries_written,
        })))
        .await;

        let mut summary = BulkSummary::new(BulkOperation::Move, cmd.ids.len(), outcome.item_ids);
        summary.stock_rows_written = Some(outcome.stock_rows_written);
        summary.ledger_entries_written = Some(outcome.ledger_entries_written);
        Ok(summary)
    }

    async fn try_bulk_recategorize(
        &self,
        principal: &Principal,
        request: &RecategorizeRequest,
    ) -> Result<BulkSummary, BulkError> {
        let cmd = request.validate()?;
        self.guard(principal, BulkOperation::Recategorize)?;

        let affected = self
            .store
            .recategorize_items(principal.active_tenant_id, &cmd.ids, cmd.category_id, Utc::now())
            .await?;

        self.audit_committed(
            entry(principal, BulkOperation::Recategorize, &affected)
                .with_details(json!({ "requested": cmd.ids.len(), "category_id": cmd.category_id })),
        )
        .await;
        Ok(BulkSummary::new(BulkOperation::Recategorize, cmd.ids.len(), affected))
    }

    fn guard(&self, principal: &Principal, operation: BulkOperation) -> Result<(), AuthzError> {
        authorize(principal, operation.as_str(), &self.policy)
    }

    /// The change is already committed, so a lost audit entry is only logged.
    async fn audit_committed(&self, entry: AuditEntry) {
        let action = entry.action.clone();
        if let Err(err) = self.audit.record(entry).await {
            tracing::warn!(action = %action, error = %err, "audit entry lost after committed change");
        }
    }
}

fn entry(principal: &Principal, operation: BulkOperation, ids: &[wareflow_core::ItemId]) -> AuditEntry {
    AuditEntry::new(
        principal.active_tenant_id,
        principal.principal_id,
        operation.as_str(),
        Utc::now(),
    )
    .for_resources(ITEM_RESOURCE, ids.iter().copied())
}

fn conclude<P: Debug>(
    operation: BulkOperation,
    principal: &Principal,
    params: &P,
    result: Result<BulkSummary, BulkError>,
) -> ActionResult<BulkSummary> {
    match result {
        Ok(summary) => {
            tracing::info!(
                operation = %operation,
                tenant_id = %principal.active_tenant_id,
                actor_id = %principal.principal_id,
                requested = summary.requested,
                affected = summary.affected,
                "bulk operation completed"
            );
            ActionResult::ok(summary)
        }
        Err(err) => {
            match err.kind() {
                FailureKind::Persistence => tracing::error!(
                    operation = %operation,
                    tenant_id = %principal.active_tenant_id,
                    actor_id = %principal.principal_id,
                    params = ?params,
                    error = %err,
                    "bulk operation failed"
                ),
                FailureKind::Validation | FailureKind::Forbidden => tracing::warn!(
                    operation = %operation,
                    tenant_id = %principal.active_tenant_id,
                    actor_id = %principal.principal_id,
                    params = ?params,
                    error = %err,
                    "bulk operation rejected"
                ),
            }
            ActionResult::failed(&err)
        }
    }
}
