//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Mill inputs such as a yield structure or a set of working costs have no
/// identity: two cost sheets with the same figures are the same cost sheet.
/// Value objects are immutable; to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Rate {
///     rupees_per_quintal: f64,
/// }
///
/// impl ValueObject for Rate {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
