//! Generic registry trait for immutable key-value lookups
//!
//! A registry is populated through a builder during startup and read-only
//! afterwards: single writer at construction time, many readers at runtime,
//! and no hidden process-wide state. Rebuild when the set of entries changes.

use std::borrow::Borrow;

/// A read-only registry of key-value entries
pub trait Registry {
    /// The key type used for lookups
    type Key;

    /// The value type stored in the registry
    type Value;

    /// Get a value by key
    fn get<Q>(&self, key: &Q) -> Option<&Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Eq + std::hash::Hash;

    /// Check if the registry contains a key
    fn contains<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Eq + std::hash::Hash,
    {
        self.get(key).is_some()
    }

    /// Iterate all key-value pairs
    fn iter(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;

    /// Number of keys in the registry
    fn len(&self) -> usize;

    /// Check if the registry is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accumulates registrations, then builds an immutable registry
pub trait RegistryBuilder: Default {
    /// The immutable registry type this builder produces
    type Registry: Registry;

    /// The key type
    type Key;

    /// The value type
    type Value;

    /// Register a key-value pair. A later registration for the same key
    /// silently replaces the earlier one.
    fn register(self, key: Self::Key, value: Self::Value) -> Self;

    /// Build the immutable registry
    fn build(self) -> Self::Registry;
}
