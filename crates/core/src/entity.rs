//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Rows that are updated in place (items, storage locations) are entities;
/// append-only rows (ledger entries, audit entries) are identified too but are
/// never mutated after insert.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
