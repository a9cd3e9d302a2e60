use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wareflow_core::{DomainError, ItemId, StorageLocationId, TenantId, TransactionId, UserId};

/// Kind of quantity change recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    In,
    Out,
    Transfer,
    AttributeChange,
    Archive,
    Restore,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::In => "in",
            TransactionKind::Out => "out",
            TransactionKind::Transfer => "transfer",
            TransactionKind::AttributeChange => "attribute_change",
            TransactionKind::Archive => "archive",
            TransactionKind::Restore => "restore",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(TransactionKind::In),
            "out" => Ok(TransactionKind::Out),
            "transfer" => Ok(TransactionKind::Transfer),
            "attribute_change" => Ok(TransactionKind::AttributeChange),
            "archive" => Ok(TransactionKind::Archive),
            "restore" => Ok(TransactionKind::Restore),
            other => Err(DomainError::invariant(format!("unknown transaction kind '{other}'"))),
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable ledger entry. Written once, never updated or deleted by the
/// service (item deletion removes them by cascade).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: TransactionId,
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    pub change_amount: i64,
    pub kind: TransactionKind,
    pub reason: String,
    pub storage_location_id: Option<StorageLocationId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_kind_uses_snake_case() {
        assert_eq!(TransactionKind::AttributeChange.as_str(), "attribute_change");
        assert_eq!("attribute_change".parse::<TransactionKind>().unwrap(), TransactionKind::AttributeChange);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("teleport".parse::<TransactionKind>().is_err());
    }
}
