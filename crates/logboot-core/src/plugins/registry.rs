//! Registration-table plugin registry

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{PluginCandidate, PluginRegistry};

/// Plugin registry backed by an explicit registration table
///
/// Candidates keep their registration order within a category, which is
/// the discovery order consumers break rank ties with. Registering a name
/// that already exists replaces that candidate in place.
///
/// # Example
///
/// ```
/// use logboot_core::plugins::{PluginCandidate, PluginRegistry, StaticPluginRegistry};
///
/// let registry = StaticPluginRegistry::<u32>::new();
/// registry.register("Numbers", PluginCandidate::new("one", 10, || Ok(1)));
/// registry.register("Numbers", PluginCandidate::new("two", 5, || Ok(2)));
///
/// let names: Vec<_> = registry.candidates("Numbers").into_iter().map(|c| c.name).collect();
/// assert_eq!(names, vec!["one", "two"]);
/// ```
pub struct StaticPluginRegistry<T> {
    categories: RwLock<HashMap<String, Vec<PluginCandidate<T>>>>,
}

impl<T> StaticPluginRegistry<T> {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Register a candidate under a category
    pub fn register(&self, category: &str, candidate: PluginCandidate<T>) {
        let mut categories = self.categories.write();
        let entries = categories.entry(category.to_string()).or_default();
        match entries.iter_mut().find(|existing| existing.name == candidate.name) {
            Some(existing) => *existing = candidate,
            None => entries.push(candidate),
        }
    }

    /// Remove a candidate; returns whether it was registered
    pub fn unregister(&self, category: &str, name: &str) -> bool {
        let mut categories = self.categories.write();
        let Some(entries) = categories.get_mut(category) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|candidate| candidate.name != name);
        before != entries.len()
    }

    pub fn contains(&self, category: &str, name: &str) -> bool {
        self.categories
            .read()
            .get(category)
            .map(|entries| entries.iter().any(|candidate| candidate.name == name))
            .unwrap_or(false)
    }

    /// Remove every candidate in every category
    pub fn clear(&self) {
        self.categories.write().clear();
    }
}

impl<T> Default for StaticPluginRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PluginRegistry<T> for StaticPluginRegistry<T> {
    fn candidates(&self, category: &str) -> Vec<PluginCandidate<T>> {
        self.categories
            .read()
            .get(category)
            .cloned()
            .unwrap_or_default()
    }
}

impl<T> std::fmt::Debug for StaticPluginRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let categories = self.categories.read();
        let mut map = f.debug_map();
        for (category, entries) in categories.iter() {
            let names: Vec<&str> = entries.iter().map(|c| c.name.as_str()).collect();
            map.entry(category, &names);
        }
        map.finish()
    }
}
