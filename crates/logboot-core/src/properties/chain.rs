//! Chained property source with fallback behavior

use std::sync::Arc;

use super::env::EnvPropertySource;
use super::file::FilePropertySource;
use super::traits::{PropertySource, SharedPropertySource};

/// A property source that chains several sources together
///
/// Lookups try each source in order and return the first value found.
///
/// # Example
///
/// ```
/// use logboot_core::properties::{ChainPropertySource, MemoryPropertySource, PropertySource};
/// use std::sync::Arc;
///
/// let overrides: Arc<dyn PropertySource> =
///     Arc::new(MemoryPropertySource::with_properties([("log4j.configurationFile", "a.xml")]));
/// let defaults: Arc<dyn PropertySource> =
///     Arc::new(MemoryPropertySource::with_properties([("log4j.configurationFile", "b.xml")]));
///
/// let chain = ChainPropertySource::new(vec![overrides, defaults]);
/// assert_eq!(chain.get_property("log4j.configurationFile").as_deref(), Some("a.xml"));
/// ```
pub struct ChainPropertySource {
    sources: Vec<SharedPropertySource>,
}

impl ChainPropertySource {
    pub fn new(sources: Vec<SharedPropertySource>) -> Self {
        Self { sources }
    }

    /// Environment variables, then the user-level component file
    ///
    /// A component file that cannot be read is left out of the chain.
    pub fn standard() -> Self {
        let mut sources: Vec<SharedPropertySource> = vec![Arc::new(EnvPropertySource::new())];
        if let Ok(file) = FilePropertySource::user() {
            sources.push(Arc::new(file));
        }
        Self::new(sources)
    }

    pub fn sources(&self) -> &[SharedPropertySource] {
        &self.sources
    }

    /// Find which source provides a key
    pub fn find_source(&self, key: &str) -> Option<&SharedPropertySource> {
        self.sources.iter().find(|source| source.contains(key))
    }
}

impl PropertySource for ChainPropertySource {
    fn name(&self) -> &str {
        "chain"
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get_property(key))
    }
}

impl std::fmt::Debug for ChainPropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainPropertySource")
            .field("sources", &format!("[{} sources]", self.sources.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::MemoryPropertySource;

    #[test]
    fn test_chain_fallback() {
        let first = Arc::new(MemoryPropertySource::new());
        let second = Arc::new(MemoryPropertySource::with_properties([("key", "from_second")]));

        let chain = ChainPropertySource::new(vec![first, second]);
        assert_eq!(chain.get_property("key"), Some("from_second".to_string()));
    }

    #[test]
    fn test_chain_priority() {
        let first = Arc::new(MemoryPropertySource::with_properties([("key", "from_first")]));
        let second = Arc::new(MemoryPropertySource::with_properties([("key", "from_second")]));

        let chain = ChainPropertySource::new(vec![first, second]);
        assert_eq!(chain.get_property("key"), Some("from_first".to_string()));
    }

    #[test]
    fn test_chain_skips_blank_values() {
        let first = Arc::new(MemoryPropertySource::with_properties([("key", " ")]));
        let second = Arc::new(MemoryPropertySource::with_properties([("key", "value")]));

        let chain = ChainPropertySource::new(vec![first, second]);
        assert_eq!(chain.get_property("key"), Some("value".to_string()));
    }

    #[test]
    fn test_chain_find_source() {
        let first = Arc::new(MemoryPropertySource::new());
        let second = Arc::new(MemoryPropertySource::with_properties([("key", "value")]));

        let chain = ChainPropertySource::new(vec![first, second]);
        assert_eq!(chain.find_source("key").map(|s| s.name()), Some("memory"));
        assert!(chain.find_source("missing").is_none());
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainPropertySource::new(Vec::new());
        assert_eq!(chain.get_property("key"), None);
    }

    #[test]
    fn test_standard_chain_starts_with_env() {
        let chain = ChainPropertySource::standard();
        assert_eq!(chain.sources()[0].name(), "env");
    }
}
