//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object has no identity of its own: two instances holding the same
/// attributes are interchangeable. Construct a new one instead of mutating.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Reason(String);
///
/// impl ValueObject for Reason {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
