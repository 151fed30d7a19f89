//! Provider manifests and descriptors

use serde::Deserialize;
use thiserror::Error;

use crate::resource::{ConfigurationSource, LoadingContext, Origin};

/// Resource name of a provider manifest
pub const PROVIDER_RESOURCE: &str = "META-INF/logboot-provider.yaml";

/// API version prefixes a provider may declare
pub const COMPATIBLE_API_VERSIONS: &[&str] = &["2.6.0"];

/// Priority assumed when a manifest does not declare one
pub const DEFAULT_PRIORITY: i32 = -1;

/// Whether a declared API version starts with a compatible prefix
pub fn is_compatible_version(version: &str) -> bool {
    COMPATIBLE_API_VERSIONS
        .iter()
        .any(|prefix| version.starts_with(prefix))
}

/// Errors that can occur when reading a provider manifest
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Malformed provider manifest {origin}: {message}")]
    Manifest { origin: String, message: String },

    #[error("Provider manifest {origin} does not declare Log4jAPIVersion")]
    MissingVersion { origin: String },

    #[error("Provider manifest {origin} declares incompatible API version {version}")]
    IncompatibleVersion { origin: String, version: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Manifest layout, e.g.
///
/// ```yaml
/// Log4jAPIVersion: "2.6.0"
/// FactoryPriority: 10
/// LoggerContextFactory: acme::logging::ContextFactory
/// ThreadContextMap: acme::logging::ContextMap
/// ```
#[derive(Debug, Default, Deserialize)]
struct ProviderManifest {
    #[serde(rename = "Log4jAPIVersion")]
    api_version: Option<Scalar>,
    #[serde(rename = "FactoryPriority")]
    priority: Option<Scalar>,
    #[serde(rename = "LoggerContextFactory")]
    logger_context_factory: Option<String>,
    #[serde(rename = "ThreadContextMap")]
    thread_context_map: Option<String>,
}

/// Manifest values may be written quoted or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// An available logging back-end, as declared by its manifest
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    api_version: String,
    priority: i32,
    logger_context_factory: Option<String>,
    thread_context_map: Option<String>,
    origin: Origin,
    context: LoadingContext,
}

impl ProviderDescriptor {
    /// Read and validate a manifest
    pub fn from_manifest(
        source: &ConfigurationSource,
        context: &LoadingContext,
    ) -> ProviderResult<Self> {
        let origin = source.origin().to_string();
        let manifest: ProviderManifest = if source.data().iter().all(u8::is_ascii_whitespace) {
            ProviderManifest::default()
        } else {
            serde_yaml::from_slice(source.data()).map_err(|e| ProviderError::Manifest {
                origin: origin.clone(),
                message: e.to_string(),
            })?
        };

        let api_version = manifest
            .api_version
            .map(Scalar::into_text)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ProviderError::MissingVersion {
                origin: origin.clone(),
            })?;
        if !is_compatible_version(&api_version) {
            return Err(ProviderError::IncompatibleVersion {
                origin,
                version: api_version,
            });
        }

        let priority = match manifest.priority.map(Scalar::into_text) {
            Some(text) => text.trim().parse().map_err(|_| ProviderError::Manifest {
                origin: origin.clone(),
                message: format!("FactoryPriority '{}' is not an integer", text),
            })?,
            None => DEFAULT_PRIORITY,
        };

        Ok(Self {
            api_version,
            priority,
            logger_context_factory: manifest.logger_context_factory,
            thread_context_map: manifest.thread_context_map,
            origin: source.origin().clone(),
            context: context.clone(),
        })
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn logger_context_factory(&self) -> Option<&str> {
        self.logger_context_factory.as_deref()
    }

    pub fn thread_context_map(&self) -> Option<&str> {
        self.thread_context_map.as_deref()
    }

    /// Where the manifest was read from
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Context the provider's components are loaded with
    pub fn context(&self) -> &LoadingContext {
        &self.context
    }
}

impl std::fmt::Display for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Provider[priority={}", self.priority)?;
        if let Some(factory) = &self.logger_context_factory {
            write!(f, ", factory={}", factory)?;
        }
        if let Some(map) = &self.thread_context_map {
            write!(f, ", contextMap={}", map)?;
        }
        write!(f, ", origin={}, context={}]", self.origin, self.context.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MemoryResourceLoader;
    use std::sync::Arc;

    fn context() -> LoadingContext {
        LoadingContext::new("test", Arc::new(MemoryResourceLoader::new()))
    }

    fn parse(manifest: &str) -> ProviderResult<ProviderDescriptor> {
        ProviderDescriptor::from_manifest(&ConfigurationSource::from_bytes(manifest), &context())
    }

    #[test]
    fn test_version_whitelist() {
        assert!(is_compatible_version("2.6.0"));
        assert!(is_compatible_version("2.6.0-rc1"));
        assert!(!is_compatible_version("2.6"));
        assert!(!is_compatible_version("2.5.0"));
        assert!(!is_compatible_version(""));
    }

    #[test]
    fn test_full_manifest() {
        let descriptor = parse(
            "Log4jAPIVersion: \"2.6.0\"\n\
             FactoryPriority: 10\n\
             LoggerContextFactory: acme::ContextFactory\n\
             ThreadContextMap: acme::ContextMap\n",
        )
        .unwrap();

        assert_eq!(descriptor.api_version(), "2.6.0");
        assert_eq!(descriptor.priority(), 10);
        assert_eq!(descriptor.logger_context_factory(), Some("acme::ContextFactory"));
        assert_eq!(descriptor.thread_context_map(), Some("acme::ContextMap"));
        assert_eq!(descriptor.context().name(), "test");
        assert!(descriptor.to_string().starts_with("Provider[priority=10"));
    }

    #[test]
    fn test_priority_defaults_and_quoted_values() {
        let descriptor = parse("Log4jAPIVersion: 2.6.0\n").unwrap();
        assert_eq!(descriptor.priority(), DEFAULT_PRIORITY);

        let descriptor = parse("Log4jAPIVersion: 2.6.0\nFactoryPriority: \"7\"\n").unwrap();
        assert_eq!(descriptor.priority(), 7);
    }

    #[test]
    fn test_rejected_manifests() {
        assert!(matches!(
            parse("Log4jAPIVersion: 2.5.0\n"),
            Err(ProviderError::IncompatibleVersion { .. })
        ));
        assert!(matches!(
            parse("FactoryPriority: 1\n"),
            Err(ProviderError::MissingVersion { .. })
        ));
        assert!(matches!(parse(""), Err(ProviderError::MissingVersion { .. })));
        assert!(matches!(
            parse("Log4jAPIVersion: 2.6.0\nFactoryPriority: high\n"),
            Err(ProviderError::Manifest { .. })
        ));
        assert!(matches!(parse("[not, a, map]"), Err(ProviderError::Manifest { .. })));
    }
}
