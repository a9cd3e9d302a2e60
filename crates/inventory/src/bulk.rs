//! Bulk operation inputs and their validation.
//!
//! Requests arrive as raw strings (from forms or JSON). `validate()` turns
//! them into typed commands or rejects them before anything touches storage.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use wareflow_core::{CategoryId, DomainError, DomainResult, ItemId, StorageLocationId, ValueObject};

/// Upper bound on ids accepted in one call.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Upper bound on reason length, in characters.
pub const MAX_REASON_LEN: usize = 500;

/// The five bulk operations, keyed the way the policy table names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperation {
    Archive,
    Restore,
    PermanentDelete,
    Move,
    Recategorize,
}

impl BulkOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            BulkOperation::Archive => "inventory.archive",
            BulkOperation::Restore => "inventory.restore",
            BulkOperation::PermanentDelete => "inventory.delete",
            BulkOperation::Move => "inventory.move",
            BulkOperation::Recategorize => "inventory.recategorize",
        }
    }
}

impl core::fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text justification attached to a bulk operation.
///
/// Bounds apply to the trimmed text; the caller's string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Reason(String);

impl ValueObject for Reason {}

impl Reason {
    /// Non-empty after trimming, at most [`MAX_REASON_LEN`] characters.
    pub fn required(field: &'static str, raw: &str) -> DomainResult<Self> {
        let reason = Self::optional(field, raw)?;
        if reason.is_empty() {
            return Err(DomainError::validation(field, "a reason is required"));
        }
        Ok(reason)
    }

    /// May be empty, at most [`MAX_REASON_LEN`] characters.
    pub fn optional(field: &'static str, raw: &str) -> DomainResult<Self> {
        let len = raw.trim().chars().count();
        if len > MAX_REASON_LEN {
            return Err(DomainError::validation(
                field,
                format!("must be at most {MAX_REASON_LEN} characters (got {len})"),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Exactly what the caller sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    /// True when the reason is blank.
    pub fn is_empty(&self) -> bool {
        self.trimmed().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRequest {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreRequest {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub target_location_id: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecategorizeRequest {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveItems {
    pub ids: Vec<ItemId>,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreItems {
    pub ids: Vec<ItemId>,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteItems {
    pub ids: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveItems {
    pub ids: Vec<ItemId>,
    pub target_location_id: StorageLocationId,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecategorizeItems {
    pub ids: Vec<ItemId>,
    pub category_id: CategoryId,
}

impl ArchiveRequest {
    pub fn validate(&self) -> DomainResult<ArchiveItems> {
        Ok(ArchiveItems {
            ids: parse_ids(&self.ids)?,
            reason: Reason::required("reason", &self.reason)?,
        })
    }
}

impl RestoreRequest {
    pub fn validate(&self) -> DomainResult<RestoreItems> {
        Ok(RestoreItems {
            ids: parse_ids(&self.ids)?,
            reason: Reason::optional("reason", &self.reason)?,
        })
    }
}

impl DeleteRequest {
    pub fn validate(&self) -> DomainResult<DeleteItems> {
        Ok(DeleteItems {
            ids: parse_ids(&self.ids)?,
        })
    }
}

impl MoveRequest {
    pub fn validate(&self) -> DomainResult<MoveItems> {
        let ids = parse_ids(&self.ids)?;
        let target_location_id = self
            .target_location_id
            .parse::<StorageLocationId>()
            .map_err(|_| DomainError::validation("target_location_id", "is not a valid location id"))?;
        Ok(MoveItems {
            ids,
            target_location_id,
            reason: Reason::optional("reason", &self.reason)?,
        })
    }
}

impl RecategorizeRequest {
    pub fn validate(&self) -> DomainResult<RecategorizeItems> {
        let ids = parse_ids(&self.ids)?;
        let category_id = self
            .category_id
            .parse::<CategoryId>()
            .map_err(|_| DomainError::validation("category_id", "is not a valid category id"))?;
        Ok(RecategorizeItems { ids, category_id })
    }
}

/// Parse, bound and de-duplicate (first occurrence wins) an id list.
fn parse_ids(raw: &[String]) -> DomainResult<Vec<ItemId>> {
    if raw.is_empty() {
        return Err(DomainError::validation("ids", "select at least one item"));
    }
    if raw.len() > MAX_BATCH_SIZE {
        return Err(DomainError::validation(
            "ids",
            format!("at most {MAX_BATCH_SIZE} items per operation (got {})", raw.len()),
        ));
    }

    let mut seen = HashSet::with_capacity(raw.len());
    let mut ids = Vec::with_capacity(raw.len());
    for s in raw {
        let id = s
            .parse::<ItemId>()
            .map_err(|_| DomainError::validation("ids", format!("'{s}' is not a valid item id")))?;
        if seen.insert(id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
