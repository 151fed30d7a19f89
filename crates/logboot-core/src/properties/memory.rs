//! In-memory property source

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{normalize_value, PropertySource};

/// In-memory property source for tests and embedding applications
#[derive(Debug, Default)]
pub struct MemoryPropertySource {
    properties: RwLock<HashMap<String, String>>,
}

impl MemoryPropertySource {
    /// Create a new empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with initial properties
    pub fn with_properties<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            properties: RwLock::new(
                properties
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.properties.write().remove(key)
    }

    pub fn clear(&self) {
        self.properties.write().clear();
    }
}

impl PropertySource for MemoryPropertySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.properties
            .read()
            .get(key)
            .and_then(|v| normalize_value(v))
    }
}
