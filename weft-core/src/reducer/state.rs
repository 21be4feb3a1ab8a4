//! Combined State
//!
//! A [`State`] maps field names to values. It is immutable and cheap to
//! clone: clones share one allocation, and [`State::ptr_eq`] tells whether
//! two handles are the same instance. A combined reducer returns its input
//! handle when no field changed, so downstream code can detect "nothing
//! happened" with a pointer comparison.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// An immutable snapshot of every field's value.
pub struct State<V> {
    values: Arc<IndexMap<Arc<str>, V>>,
}

impl<V> State<V> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::from_map(IndexMap::new())
    }

    pub(crate) fn from_map(values: IndexMap<Arc<str>, V>) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    /// Get a field's value.
    pub fn get<Q>(&self, field: &Q) -> Option<&V>
    where
        Arc<str>: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.values.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|key| &**key)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.values.iter().map(|(key, value)| (&**key, value))
    }

    /// Whether both handles point at the same instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.values, &b.values)
    }
}

impl<V> Clone for State<V> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}

impl<V> Default for State<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for State<V> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.values == other.values
    }
}

impl<V: Eq> Eq for State<V> {}

impl<V: fmt::Debug> fmt::Debug for State<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for State<V>
where
    K: Into<Arc<str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

impl<V: Serialize> Serialize for State<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for State<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = IndexMap::<String, V>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}
