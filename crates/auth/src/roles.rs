use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are opaque strings at this layer. Comparison against policy tables is
/// ASCII case-insensitive, so "Warehouse" from an identity provider matches the
/// `warehouse` allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const MANAGEMENT: &'static str = "management";
    pub const WAREHOUSE: &'static str = "warehouse";
    pub const SALES: &'static str = "sales";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn admin() -> Self {
        Self::from_static(Self::ADMIN)
    }

    pub fn management() -> Self {
        Self::from_static(Self::MANAGEMENT)
    }

    pub fn warehouse() -> Self {
        Self::from_static(Self::WAREHOUSE)
    }

    pub fn sales() -> Self {
        Self::from_static(Self::SALES)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, name: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(name)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert!(Role::new("Warehouse").matches(Role::WAREHOUSE));
        assert!(!Role::sales().matches(Role::WAREHOUSE));
    }
}
