//! Declarative operation → role allow-lists.
//!
//! Every guarded operation is one row in a static table; `PolicyTable::evaluate`
//! is the only place a role is compared against an allow-list.

use crate::Role;

/// Roles allowed to perform one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowList {
    pub operation: &'static str,
    pub roles: &'static [&'static str],
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// A fixed set of allow-lists, one per operation.
#[derive(Debug, Clone, Copy)]
pub struct PolicyTable {
    entries: &'static [AllowList],
}

impl PolicyTable {
    pub const fn new(entries: &'static [AllowList]) -> Self {
        Self { entries }
    }

    /// Allow-list for `operation`, if the operation is known.
    pub fn allowed_roles(&self, operation: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|e| e.operation == operation)
            .map(|e| e.roles)
    }

    /// Decide whether any of `roles` may perform `operation`.
    ///
    /// Unknown operations are denied.
    pub fn evaluate(&self, operation: &str, roles: &[Role]) -> Decision {
        let Some(allowed) = self.allowed_roles(operation) else {
            return Decision::Deny;
        };

        if roles
            .iter()
            .any(|role| allowed.iter().any(|name| role.matches(name)))
        {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: PolicyTable = PolicyTable::new(&[
        AllowList {
            operation: "things.edit",
            roles: &[Role::ADMIN, Role::WAREHOUSE],
        },
        AllowList {
            operation: "things.purge",
            roles: &[Role::ADMIN],
        },
    ]);

    #[test]
    fn allows_listed_role() {
        assert_eq!(TABLE.evaluate("things.edit", &[Role::warehouse()]), Decision::Allow);
    }

    #[test]
    fn denies_role_missing_from_stricter_list() {
        assert_eq!(TABLE.evaluate("things.purge", &[Role::warehouse()]), Decision::Deny);
        assert_eq!(TABLE.evaluate("things.purge", &[Role::admin()]), Decision::Allow);
    }

    #[test]
    fn any_granted_role_is_enough() {
        let roles = [Role::sales(), Role::new("ADMIN")];
        assert!(TABLE.evaluate("things.purge", &roles).is_allowed());
    }

    #[test]
    fn unknown_operation_and_empty_roles_deny() {
        assert_eq!(TABLE.evaluate("things.unknown", &[Role::admin()]), Decision::Deny);
        assert_eq!(TABLE.evaluate("things.edit", &[]), Decision::Deny);
    }
}
