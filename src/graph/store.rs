//! Case-insensitive storage backing [`DependencyGraph`](super::DependencyGraph).
//!
//! Package names are matched without regard to case. Keys keep the casing
//! they were first inserted with, so iteration yields original names.

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::error::{GraphError, GraphResult};

/// An insertion-ordered map whose string keys compare case-insensitively.
///
/// Probe keys are lower-cased before lookup. The stored key keeps the casing
/// used when it was first inserted; overwriting with a differently-cased key
/// replaces the value but keeps the original key and position.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    entries: IndexMap<String, (String, V)>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn fold(key: &str) -> String {
    key.to_lowercase()
}

impl<V> CaseInsensitiveMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Looks up a value, ignoring the case of `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&fold(key)).map(|(_, value)| value)
    }

    /// Mutable lookup, ignoring the case of `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(&fold(key)).map(|(_, value)| value)
    }

    /// Returns true if `key`, in any casing, is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    /// Inserts or overwrites a value, returning the previous one if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.entry(fold(&key)) {
            Entry::Occupied(mut entry) => Some(std::mem::replace(&mut entry.get_mut().1, value)),
            Entry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Keys in insertion order, with their original casing.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(key, _)| key.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|(_, value)| value)
    }

    /// `(original key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps canonical node names to node records.
///
/// The store does not reject duplicates; that policy belongs to the graph.
#[derive(Debug, Clone)]
pub struct NodeStore<N> {
    nodes: CaseInsensitiveMap<N>,
}

impl<N> Default for NodeStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodeStore<N> {
    pub fn new() -> Self {
        Self {
            nodes: CaseInsensitiveMap::new(),
        }
    }

    /// Returns true if a node with this name is present.
    pub fn exists(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Gets a node, failing with [`GraphError::NotFound`] if absent.
    pub fn get(&self, name: &str) -> GraphResult<&N> {
        self.nodes
            .get(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> GraphResult<&mut N> {
        self.nodes
            .get_mut(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    /// Inserts or overwrites a node.
    pub fn set(&mut self, name: impl Into<String>, node: N) {
        self.nodes.insert(name, node);
    }

    /// Snapshot of node names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.nodes.keys().map(str::to_string).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Maps each source node name to its outgoing edges (target name -> payload).
#[derive(Debug, Clone)]
pub struct RelationStore<E> {
    buckets: CaseInsensitiveMap<CaseInsensitiveMap<E>>,
}

impl<E> Default for RelationStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RelationStore<E> {
    pub fn new() -> Self {
        Self {
            buckets: CaseInsensitiveMap::new(),
        }
    }

    /// Creates an empty edge bucket for `name` if it has none.
    pub fn init(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.buckets.contains_key(&name) {
            self.buckets.insert(name, CaseInsensitiveMap::new());
        }
    }

    /// Gets the outgoing edges of `name`.
    ///
    /// Fails with [`GraphError::NotFound`] if `name` has no bucket.
    pub fn get(&self, name: &str) -> GraphResult<&CaseInsensitiveMap<E>> {
        self.buckets
            .get(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    /// Sets or overwrites the edge `name -> to`.
    pub fn set(&mut self, name: &str, to: impl Into<String>, payload: E) -> GraphResult<()> {
        let bucket = self
            .buckets
            .get_mut(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))?;
        bucket.insert(to, payload);
        Ok(())
    }

    /// Returns true if `to` is a target in `from`'s bucket.
    pub fn exists(&self, from: &str, to: &str) -> bool {
        self.buckets
            .get(from)
            .is_some_and(|bucket| bucket.contains_key(to))
    }

    /// Total number of edges across all buckets.
    pub fn edge_count(&self) -> usize {
        self.buckets.values().map(CaseInsensitiveMap::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CaseInsensitiveMap<E>)> {
        self.buckets.iter()
    }
}

impl<E: Clone> RelationStore<E> {
    /// For every source with an edge to `name`, returns `{source: payload}`.
    pub fn dependants_of(&self, name: &str) -> IndexMap<String, E> {
        self.buckets
            .iter()
            .filter_map(|(source, bucket)| {
                bucket
                    .get(name)
                    .map(|payload| (source.to_string(), payload.clone()))
            })
            .collect()
    }
}
