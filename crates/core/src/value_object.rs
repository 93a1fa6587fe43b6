//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attributes. To
/// "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Money(Decimal);
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
