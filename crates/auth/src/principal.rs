use serde::{Deserialize, Serialize};

use wareflow_core::TenantId;

use crate::Role;

/// A principal's membership in a tenant.
///
/// This is an authorization boundary object: it states *which tenant* the
/// principal is acting within and which roles are granted there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMembership {
    pub tenant_id: TenantId,
    pub roles: Vec<Role>,
}

impl TenantMembership {
    pub fn new(tenant_id: TenantId, roles: Vec<Role>) -> Self {
        Self { tenant_id, roles }
    }
}
