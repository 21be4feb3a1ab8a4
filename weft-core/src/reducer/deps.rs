//! Resolved dependency values handed to a field reducer.

use std::fmt;

use smallvec::SmallVec;

/// The values a field declared it needs, resolved for the current call.
///
/// Entries follow annotation order exactly, so `@both x` contributes the
/// previous value of `x` followed by its fresh value. An entry is `None` when
/// the source has nothing to offer: no previous state yet, a call-time
/// argument that was not supplied, or a target left unbound.
pub struct Deps<'a, V> {
    values: SmallVec<[Option<&'a V>; 4]>,
}

impl<'a, V> Deps<'a, V> {
    /// A dependency list with no entries, as seen by plain fields.
    pub fn empty() -> Self {
        Self {
            values: SmallVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, or `None` if it is absent or out of range.
    pub fn get(&self, index: usize) -> Option<&'a V> {
        self.values.get(index).copied().flatten()
    }

    /// Every entry, absent ones included.
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a V>> + '_ {
        self.values.iter().copied()
    }

    /// Only the entries that are present.
    pub fn present(&self) -> impl Iterator<Item = &'a V> + '_ {
        self.values.iter().flatten().copied()
    }
}

impl<'a, V> FromIterator<Option<&'a V>> for Deps<'a, V> {
    fn from_iter<I: IntoIterator<Item = Option<&'a V>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Deps<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}
