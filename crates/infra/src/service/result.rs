//! Uniform result shape of bulk operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use wareflow_auth::AuthzError;
use wareflow_core::{DomainError, ItemId};
use wareflow_inventory::BulkOperation;

use crate::audit::AuditError;
use crate::store::StoreError;

/// Message shown to callers for every persistence failure.
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "The operation could not be completed. Please try again later.";

/// Message shown to callers who lack the required role.
pub const FORBIDDEN_MESSAGE: &str = "insufficient rights";

/// Coarse failure class, used for HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Forbidden,
    Persistence,
}

/// Why a bulk operation did not complete.
#[derive(Debug, Error)]
pub enum BulkError {
    #[error("validation failed: {0}")]
    Validation(#[from] DomainError),

    #[error("authorization failed: {0}")]
    Forbidden(#[from] AuthzError),

    #[error("storage failed: {0}")]
    Persistence(#[from] StoreError),

    #[error("audit trail failed: {0}")]
    Audit(#[from] AuditError),
}

impl BulkError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BulkError::Validation(_) => FailureKind::Validation,
            BulkError::Forbidden(_) => FailureKind::Forbidden,
            BulkError::Persistence(_) | BulkError::Audit(_) => FailureKind::Persistence,
        }
    }

    /// Caller-facing text. Only validation errors carry specifics.
    pub fn public_message(&self) -> String {
        match self {
            BulkError::Validation(err) => err.to_string(),
            BulkError::Forbidden(_) => FORBIDDEN_MESSAGE.to_string(),
            BulkError::Persistence(_) | BulkError::Audit(_) => PERSISTENCE_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// What a successful bulk operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub operation: BulkOperation,
    /// Distinct ids in the request.
    pub requested: usize,
    /// Items that existed in the tenant and were changed.
    pub affected: usize,
    pub item_ids: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_rows_written: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_entries_written: Option<usize>,
}

impl BulkSummary {
    pub fn new(operation: BulkOperation, requested: usize, item_ids: Vec<ItemId>) -> Self {
        Self {
            operation,
            requested,
            affected: item_ids.len(),
            item_ids,
            stock_rows_written: None,
            ledger_entries_written: None,
        }
    }
}

/// `{ success, error?, data? }`. Operations return this instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
            failure: None,
        }
    }

    pub fn failed(err: &BulkError) -> Self {
        Self {
            success: false,
            error: Some(err.public_message()),
            data: None,
            failure: Some(err.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wareflow_core::ItemId;

    #[test]
    fn persistence_details_stay_internal() {
        let err = BulkError::from(StoreError::Backend("connection reset by peer".into()));
        let result: ActionResult<BulkSummary> = ActionResult::failed(&err);

        assert_eq!(result.error.as_deref(), Some(PERSISTENCE_FAILURE_MESSAGE));
        assert_eq!(result.failure, Some(FailureKind::Persistence));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn validation_message_is_specific() {
        let err = BulkError::from(DomainError::validation("ids", "select at least one item"));
        assert_eq!(err.public_message(), "ids: select at least one item");
        assert_eq!(err.kind(), FailureKind::Validation);
    }

    #[test]
    fn serialises_without_absent_fields() {
        let ok = ActionResult::ok(BulkSummary::new(BulkOperation::Archive, 1, vec![ItemId::new()]));
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
        assert!(json["data"].get("stock_rows_written").is_none());

        let failed: ActionResult<BulkSummary> =
            ActionResult::failed(&BulkError::from(AuthzError::TenantMismatch));
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"], FORBIDDEN_MESSAGE);
        assert!(json.get("data").is_none());
        assert!(json.get("failure").is_none());
    }
}
