//! Group → reduce → rank primitive shared by the ranked reports.
//!
//! Items are folded into one accumulator per key in a single pass. The
//! accumulators live in an insertion-ordered map, so the order in which keys
//! were first seen is kept, and the final descending sort is stable. Groups
//! with equal values therefore always come out in first-seen order.

use std::hash::Hash;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ReportError, Result};

/// A value that can be reduced within a group and ranked
pub trait Measure: Copy + Default + Ord {
    /// Combine two values, returning None on overflow
    fn checked_combine(self, other: Self) -> Option<Self>;
}

impl Measure for Decimal {
    fn checked_combine(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl Measure for i64 {
    fn checked_combine(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl Measure for u64 {
    fn checked_combine(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

/// Group `items` by `key_of`, sum `measure_of` within each group, and rank.
///
/// `measure_of` may fail (e.g. a transaction total that overflows); the
/// first failure aborts the whole tally.
pub fn tally<T, K, V, I, FK, FM>(items: I, mut key_of: FK, mut measure_of: FM) -> Result<Ranking<K, V>>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    V: Measure,
    FK: FnMut(&T) -> K,
    FM: FnMut(&T) -> Result<V>,
{
    let mut groups: IndexMap<K, V> = IndexMap::new();

    for item in items {
        let value = measure_of(&item)?;
        let total = groups.entry(key_of(&item)).or_default();
        *total = total
            .checked_combine(value)
            .ok_or(ReportError::Overflow("combining group totals"))?;
    }

    Ok(Ranking::from_groups(groups))
}

/// Count occurrences of each key
pub fn count_by<T, K, I, FK>(items: I, key_of: FK) -> Result<Ranking<K, u64>>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    FK: FnMut(&T) -> K,
{
    tally(items, key_of, |_| Ok(1))
}

/// Groups ordered by value, highest first, ties in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V: Ord> Ranking<K, V> {
    /// Rank groups collected in first-seen order
    pub fn from_groups(groups: IndexMap<K, V>) -> Self {
        let mut entries: Vec<(K, V)> = groups.into_iter().collect();
        // sort_by is stable: equal values keep their first-seen order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }
}

impl<K, V> Ranking<K, V> {
    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The top-ranked group, if any
    pub fn leader(&self) -> Option<&(K, V)> {
        self.entries.first()
    }

    /// Look up the value of a key (linear scan)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Rename keys without touching the order
    pub fn map_keys<K2>(self, mut f: impl FnMut(K) -> K2) -> Ranking<K2, V> {
        Ranking {
            entries: self.entries.into_iter().map(|(k, v)| (f(k), v)).collect(),
        }
    }

    /// Render values without touching the order
    pub fn map_values<V2>(self, mut f: impl FnMut(V) -> V2) -> Ranking<K, V2> {
        Ranking {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }

    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K, V> IntoIterator for Ranking<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'r, K, V> IntoIterator for &'r Ranking<K, V> {
    type Item = &'r (K, V);
    type IntoIter = std::slice::Iter<'r, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Serialized as a map in ranking order
impl<K: Serialize, V: Serialize> Serialize for Ranking<K, V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
