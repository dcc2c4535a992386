//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two instances built
/// from the same attributes are equal, and "changing" one means constructing a
/// new one. [`crate::Money`] is the catalog's value object.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
