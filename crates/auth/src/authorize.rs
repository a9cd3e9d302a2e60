use thiserror::Error;

use wareflow_core::{TenantId, UserId};

use crate::{PolicyTable, Role, TenantMembership};

/// A fully resolved principal for authorization decisions.
///
/// Construction of this object is decoupled from storage and transport: the
/// API derives it from verified token claims, tests build it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: UserId,
    pub active_tenant_id: TenantId,
    pub membership: TenantMembership,
}

impl Principal {
    pub fn new(principal_id: UserId, tenant_id: TenantId, roles: Vec<Role>) -> Self {
        Self {
            principal_id,
            active_tenant_id: tenant_id,
            membership: TenantMembership::new(tenant_id, roles),
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.membership.roles
    }

    pub fn role_names(&self) -> Vec<String> {
        self.membership
            .roles
            .iter()
            .map(|r| r.as_str().to_string())
            .collect()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("tenant mismatch")]
    TenantMismatch,

    #[error("forbidden: '{operation}' is not allowed for roles {roles:?}")]
    Forbidden {
        operation: String,
        roles: Vec<String>,
    },
}

/// Authorize a principal for one operation within its active tenant.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, operation: &str, policy: &PolicyTable) -> Result<(), AuthzError> {
    if principal.active_tenant_id != principal.membership.tenant_id {
        return Err(AuthzError::TenantMismatch);
    }

    if policy.evaluate(operation, principal.roles()).is_allowed() {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            operation: operation.to_string(),
            roles: principal.role_names(),
        })
    }
}
