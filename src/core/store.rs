//! Key/value storage used by command handlers.
//!
//! Values are opaque strings grouped into namespaces (typically one per
//! user or channel). The backend is external; [`MemoryStore`] is the
//! in-process implementation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use parking_lot::RwLock;

/// Separator used by [`MemoryStore::hierarchical`].
pub const DEFAULT_SEPARATOR: &str = "::";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Option<String>;

    fn set(&self, namespace: &str, key: &str, value: String);

    /// Returns whether the key existed in this namespace.
    fn delete(&self, namespace: &str, key: &str) -> bool;

    fn keys(&self, namespace: &str) -> Vec<String>;

    fn contains(&self, namespace: &str, key: &str) -> bool {
        self.get(namespace, key).is_some()
    }
}

/// In-memory store, optionally hierarchical.
///
/// With a separator, `team::user` reads fall through to `team` when the key
/// is missing; writes and deletes always stay in the namespace given.
#[derive(Debug, Default)]
pub struct MemoryStore {
    segments: RwLock<HashMap<String, BTreeMap<String, String>>>,
    separator: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hierarchical() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    #[must_use]
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            segments: RwLock::default(),
            separator: Some(separator.into()),
        }
    }

    fn parent<'a>(&self, namespace: &'a str) -> Option<&'a str> {
        let separator = self.separator.as_deref()?;
        namespace.rsplit_once(separator).map(|(parent, _)| parent)
    }

    fn lineage<'a>(&self, namespace: &'a str) -> Vec<&'a str> {
        let mut chain = vec![namespace];
        let mut current = namespace;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Removes every key of one namespace (parents are untouched).
    pub fn clear(&self, namespace: &str) {
        self.segments.write().remove(namespace);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        let segments = self.segments.read();
        self.lineage(namespace)
            .into_iter()
            .find_map(|ns| segments.get(ns).and_then(|segment| segment.get(key)))
            .cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: String) {
        self.segments
            .write()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    fn delete(&self, namespace: &str, key: &str) -> bool {
        self.segments
            .write()
            .get_mut(namespace)
            .is_some_and(|segment| segment.remove(key).is_some())
    }

    fn keys(&self, namespace: &str) -> Vec<String> {
        let segments = self.segments.read();
        let keys: BTreeSet<&String> = self
            .lineage(namespace)
            .into_iter()
            .filter_map(|ns| segments.get(ns))
            .flat_map(BTreeMap::keys)
            .collect();
        keys.into_iter().cloned().collect()
    }
}
