//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances holding the same values
/// are equal. They are immutable; "changing" one means building a new one.
///
/// In this crate every value object is also **valid by construction**. The
/// only ways to obtain one go through its validator, so code holding a
/// [`Money`](crate::Money) or an [`Email`](crate::Email) never re-checks it.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
