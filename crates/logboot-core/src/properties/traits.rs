//! Core traits and types for property lookup

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while loading a property source
#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Property source error: {0}")]
    Other(String),
}

pub type PropertyResult<T> = Result<T, PropertyError>;

/// String-keyed lookup of bootstrap settings
///
/// This is where the override keys (`log4j.configurationFile`,
/// `log4j.configurationFactory`) are read from. Implementations:
/// - Environment variables (`EnvPropertySource`)
/// - In-memory for tests and embedding (`MemoryPropertySource`)
/// - A YAML/JSON component file (`FilePropertySource`)
/// - Ordered fallback over several sources (`ChainPropertySource`)
///
/// Blank values are reported as absent.
pub trait PropertySource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up a property by key
    fn get_property(&self, key: &str) -> Option<String>;

    /// Check if a property is set
    fn contains(&self, key: &str) -> bool {
        self.get_property(key).is_some()
    }
}

/// Type alias for an Arc-wrapped property source
pub type SharedPropertySource = Arc<dyn PropertySource>;

/// Trim a raw value, mapping blank to `None`
pub(crate) fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value("  log4j2.xml "), Some("log4j2.xml".to_string()));
        assert_eq!(normalize_value("   "), None);
        assert_eq!(normalize_value(""), None);
    }
}
