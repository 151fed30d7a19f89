//! File-based property source (YAML or JSON)
//!
//! The user-level component file lives at `~/.config/logboot/component.yaml`
//! (or the platform equivalent).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{normalize_value, PropertyResult, PropertySource};

/// Flat map of bootstrap properties loaded from a file
///
/// Files ending in `.json` are parsed as JSON, anything else as YAML. Only
/// top-level scalar values are kept; numbers and booleans are stored in
/// their textual form. A missing file yields an empty source.
///
/// ```yaml
/// log4j.configurationFile: "log4j2-prod.xml,overrides.xml"
/// log4j.configurationFactory: xml
/// ```
pub struct FilePropertySource {
    path: PathBuf,
    properties: HashMap<String, String>,
}

impl FilePropertySource {
    /// Load properties from a specific path
    pub fn load(path: impl Into<PathBuf>) -> PropertyResult<Self> {
        let path = path.into();
        let properties = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if Self::is_json(&path) {
                Self::parse_json(&content)?
            } else {
                Self::parse_yaml(&content)?
            }
        } else {
            HashMap::new()
        };

        Ok(Self { path, properties })
    }

    /// Load the user-level component file
    pub fn user() -> PropertyResult<Self> {
        Self::load(Self::user_path())
    }

    /// Path of the user-level component file
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("logboot").join("component.yaml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn is_json(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    fn parse_yaml(content: &str) -> PropertyResult<HashMap<String, String>> {
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(content)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, text))
            })
            .collect())
    }

    fn parse_json(content: &str) -> PropertyResult<HashMap<String, String>> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(content)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, text))
            })
            .collect())
    }
}

impl PropertySource for FilePropertySource {
    fn name(&self) -> &str {
        "file"
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.properties.get(key).and_then(|v| normalize_value(v))
    }
}

impl std::fmt::Debug for FilePropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePropertySource")
            .field("path", &self.path)
            .field("properties", &self.properties.len())
            .finish()
    }
}
