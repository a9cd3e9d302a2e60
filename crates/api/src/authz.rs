//! API-side guard for read endpoints that need more than a valid token.
//!
//! Bulk inventory operations are guarded inside the service; this covers the
//! remaining privileged routes with the same policy evaluation.

use wareflow_auth::{authorize, AllowList, AuthzError, PolicyTable, Role};

use crate::context::{PrincipalContext, TenantContext};

pub const AUDIT_READ: &str = "audit.read";

/// Allow-lists for API-only operations.
pub const API_POLICY: PolicyTable = PolicyTable::new(&[AllowList {
    operation: AUDIT_READ,
    roles: &[Role::ADMIN, Role::MANAGEMENT],
}]);

/// Check `operation` for the current request context.
pub fn authorize_operation(
    tenant: &TenantContext,
    principal: &PrincipalContext,
    operation: &str,
) -> Result<(), AuthzError> {
    authorize(&principal.principal(tenant), operation, &API_POLICY)
}
