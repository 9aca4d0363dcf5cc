//! Read-only mapping from snippet identifier to rendered text.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::snippet::DiscoveredSnippet;

/// Registry of rendered snippets keyed by `origin::name`.
///
/// Built once per run by collecting from an iterator, then only read. The
/// registry remembers the order in which identifiers were first seen so that
/// diagnostics list them the way discovery found them.
///
/// A repeated identifier keeps its first position and takes the latest text.
#[derive(Debug, Default)]
pub struct SnippetRegistry {
    entries: HashMap<String, String>,
    order: Vec<String>,
}

impl SnippetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered text for `id`, if known.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Whether `id` is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Identifiers in discovery order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no snippets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, id: String, rendered: String) {
        match self.entries.entry(id) {
            Entry::Occupied(mut entry) => {
                tracing::warn!(id = %entry.key(), "Duplicate snippet identifier, keeping latest content");
                entry.insert(rendered);
            }
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                entry.insert(rendered);
            }
        }
    }
}

impl FromIterator<DiscoveredSnippet> for SnippetRegistry {
    fn from_iter<T: IntoIterator<Item = DiscoveredSnippet>>(iter: T) -> Self {
        let mut registry = Self::new();
        for snippet in iter {
            registry.insert(snippet.id.to_string(), snippet.rendered);
        }
        registry
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SnippetRegistry {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (id, rendered) in iter {
            registry.insert(id.into(), rendered.into());
        }
        registry
    }
}
