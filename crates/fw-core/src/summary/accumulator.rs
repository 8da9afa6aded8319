//! Derived accumulator state shared between the two digestion passes.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

/// One endpoint registered in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEndpoint {
    /// Display name, used to label the attacked-endpoints ranking.
    pub name: String,
    /// Running count of attacks attributed to this endpoint.
    pub attack_count: u64,
}

/// Index from endpoint id to its registered entry.
///
/// Built once by the endpoint pass. The incident pass may bump attack
/// counters but cannot add or remove members, which keeps incident
/// validation honest: an incident resolves only against endpoints the
/// fleet actually reported.
#[derive(Debug, Default)]
pub struct EndpointIndex {
    entries: HashMap<String, IndexedEndpoint>,
}

impl EndpointIndex {
    /// Registers an endpoint exactly once; re-registration of the same id
    /// keeps the first entry.
    pub(crate) fn register(&mut self, id: &str, name: &str) {
        self.entries
            .entry(id.to_string())
            .or_insert_with(|| IndexedEndpoint {
                name: name.to_string(),
                attack_count: 0,
            });
    }

    /// Whether the endpoint id was registered during the endpoint pass.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns the registered entry for an endpoint id.
    pub fn get(&self, id: &str) -> Option<&IndexedEndpoint> {
        self.entries.get(id)
    }

    /// Bumps the endpoint's running attack counter. Returns false when the
    /// id is not registered.
    pub(crate) fn record_attack(&mut self, id: &str) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.attack_count += 1;
                true
            }
            None => false,
        }
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A lazily-populated frequency counter.
///
/// Entries are created on first encounter and remember their encounter
/// ordinal, so ranked output sorts descending by count with ties in
/// encounter order, independent of hash iteration order.
#[derive(Debug)]
pub(crate) struct CountMap<K, V> {
    entries: HashMap<K, CountEntry<V>>,
    next_ordinal: usize,
}

#[derive(Debug)]
struct CountEntry<V> {
    value: V,
    count: u64,
    ordinal: usize,
}

impl<K: Eq + Hash, V> CountMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_ordinal: 0,
        }
    }

    /// Increments the counter for `key`, creating the entry with `init`
    /// on first encounter.
    pub fn bump_with(&mut self, key: K, init: impl FnOnce() -> V) {
        let ordinal = self.next_ordinal;
        let entry = self.entries.entry(key).or_insert_with(|| CountEntry {
            value: init(),
            count: 0,
            ordinal,
        });
        // Existing entries always carry an ordinal below next_ordinal, so
        // equality means the entry was just created.
        if entry.ordinal == ordinal {
            self.next_ordinal += 1;
        }
        entry.count += 1;
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|entry| entry.count).sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Consumes the map, returning `(key, value, count)` rows sorted
    /// descending by count with ties in encounter order.
    pub fn into_ranked(self) -> Vec<(K, V, u64)> {
        let mut rows: Vec<_> = self
            .entries
            .into_iter()
            .map(|(key, entry)| (entry.ordinal, key, entry.value, entry.count))
            .collect();
        rows.sort_by_key(|&(ordinal, _, _, count)| (Reverse(count), ordinal));
        rows.into_iter()
            .map(|(_, key, value, count)| (key, value, count))
            .collect()
    }
}

impl<K: Eq + Hash, V> Default for CountMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
