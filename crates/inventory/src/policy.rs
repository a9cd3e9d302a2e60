//! Who may run which bulk inventory operation.

use wareflow_auth::{AllowList, PolicyTable, Role};

use crate::BulkOperation;

const STOCK_KEEPERS: &[&str] = &[Role::ADMIN, Role::MANAGEMENT, Role::WAREHOUSE];

/// Allow-lists for the bulk operations. Permanent deletion is admin-only.
pub const INVENTORY_POLICY: PolicyTable = PolicyTable::new(&[
    AllowList {
        operation: "inventory.archive",
        roles: STOCK_KEEPERS,
    },
    AllowList {
        operation: "inventory.restore",
        roles: STOCK_KEEPERS,
    },
    AllowList {
        operation: "inventory.move",
        roles: STOCK_KEEPERS,
    },
    AllowList {
        operation: "inventory.recategorize",
        roles: STOCK_KEEPERS,
    },
    AllowList {
        operation: "inventory.delete",
        roles: &[Role::ADMIN],
    },
]);

impl BulkOperation {
    pub const ALL: [BulkOperation; 5] = [
        BulkOperation::Archive,
        BulkOperation::Restore,
        BulkOperation::PermanentDelete,
        BulkOperation::Move,
        BulkOperation::Recategorize,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use wareflow_auth::Decision;

    #[test]
    fn every_operation_has_an_allow_list() {
        for op in BulkOperation::ALL {
            assert!(INVENTORY_POLICY.allowed_roles(op.as_str()).is_some(), "{op} missing");
        }
    }

    #[test]
    fn table_names_only_bulk_operations() {
        let listed: Vec<_> = INVENTORY_POLICY.operations().collect();
        assert_eq!(listed.len(), BulkOperation::ALL.len());
        assert!(listed.iter().all(|name| BulkOperation::ALL.iter().any(|op| op.as_str() == *name)));
    }

    #[test]
    fn sales_is_denied_everywhere() {
        for op in BulkOperation::ALL {
            assert_eq!(INVENTORY_POLICY.evaluate(op.as_str(), &[Role::new("Sales")]), Decision::Deny);
        }
    }

    #[test]
    fn warehouse_is_denied_only_permanent_delete() {
        for op in BulkOperation::ALL {
            let expected = if op == BulkOperation::PermanentDelete {
                Decision::Deny
            } else {
                Decision::Allow
            };
            assert_eq!(INVENTORY_POLICY.evaluate(op.as_str(), &[Role::new("Warehouse")]), expected);
        }
    }
}
