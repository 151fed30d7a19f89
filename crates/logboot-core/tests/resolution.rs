//! End-to-end resolution against a real directory tree

use std::any::Any;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use logboot_core::config::{
    Configuration, ConfigurationFactory, ConfigurationResolver, FactoryError, FactoryResult,
    SharedConfiguration, SharedConfigurationFactory, CATEGORY, CONFIGURATION_FILE_PROPERTY,
};
use logboot_core::plugins::{PluginCandidate, StaticPluginRegistry};
use logboot_core::properties::MemoryPropertySource;
use logboot_core::provider::{ProviderRegistry, PROVIDER_RESOURCE};
use logboot_core::resource::{ConfigurationSource, FileSystemLoader, LoadingContext};
use logboot_core::status::{MemoryStatusLogger, StatusLevel};
use tempfile::tempdir;

/// `key = value` lines; anything else is a parse error
#[derive(Debug)]
struct LinesConfiguration {
    location: Option<String>,
    entries: Vec<(String, String)>,
}

impl LinesConfiguration {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Configuration for LinesConfiguration {
    fn name(&self) -> &str {
        self.get("name").unwrap_or("unnamed")
    }

    fn location(&self) -> Option<String> {
        self.location.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct LinesFactory {
    types: Vec<String>,
}

impl ConfigurationFactory for LinesFactory {
    fn name(&self) -> &str {
        "lines"
    }

    fn supported_types(&self) -> &[String] {
        &self.types
    }

    fn parse(&self, source: &ConfigurationSource) -> FactoryResult<Option<SharedConfiguration>> {
        let location = source.location();
        let text = source
            .as_str()
            .map_err(|e| FactoryError::parse("lines", location.clone().unwrap_or_default(), e.to_string()))?;

        let mut entries = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (key, value) = line.split_once('=').ok_or_else(|| {
                FactoryError::parse("lines", location.clone().unwrap_or_default(), format!("bad line: {}", line))
            })?;
            entries.push((key.trim().to_string(), value.trim().to_string()));
        }
        let config: SharedConfiguration = Arc::new(LinesConfiguration { location, entries });
        Ok(Some(config))
    }
}

struct Harness {
    resolver: ConfigurationResolver,
    properties: Arc<MemoryPropertySource>,
    status: Arc<MemoryStatusLogger>,
}

fn harness(root: &Path) -> Harness {
    let plugins = Arc::new(StaticPluginRegistry::<SharedConfigurationFactory>::new());
    plugins.register(
        CATEGORY,
        PluginCandidate::new("lines", 10, || {
            Ok(Arc::new(LinesFactory {
                types: vec![".conf".to_string(), ".lines".to_string()],
            }) as SharedConfigurationFactory)
        }),
    );
    let properties = Arc::new(MemoryPropertySource::new());
    let status = Arc::new(MemoryStatusLogger::new());
    let context = LoadingContext::new("root", Arc::new(FileSystemLoader::new([root])));

    Harness {
        resolver: ConfigurationResolver::new(plugins, properties.clone(), context, status.clone()),
        properties,
        status,
    }
}

fn lines(config: &SharedConfiguration) -> &LinesConfiguration {
    config.as_any().downcast_ref::<LinesConfiguration>().unwrap()
}

#[test]
fn test_conventional_names_on_disk() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("log4j2.conf"), "name = main\n").unwrap();
    let h = harness(dir.path());

    let config = h.resolver.get_configuration(Some("app"), None).unwrap();
    assert_eq!(config.name(), "main");

    fs::write(dir.path().join("log4j2-test.lines"), "name = test\n").unwrap();
    let config = h.resolver.get_configuration(Some("app"), None).unwrap();
    assert_eq!(config.name(), "test");

    fs::write(dir.path().join("log4j2-testapp.conf"), "name = test-app\n").unwrap();
    let config = h.resolver.get_configuration(Some("app"), None).unwrap();
    assert_eq!(config.name(), "test-app");
}

#[test]
fn test_explicit_absolute_path_and_file_url() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.conf");
    fs::write(&path, "name = custom\nlevel = debug\n").unwrap();
    let h = harness(dir.path());

    let config = h
        .resolver
        .get_configuration(None, Some(path.to_str().unwrap()))
        .unwrap();
    assert_eq!(lines(&config).get("level"), Some("debug"));

    let url = url::Url::from_file_path(&path).unwrap();
    let config = h.resolver.get_configuration(None, Some(url.as_str())).unwrap();
    assert_eq!(config.name(), "custom");
}

#[test]
fn test_composite_override_from_disk() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("base.conf"), "name = base\n").unwrap();
    fs::write(dir.path().join("extra.lines"), "name = extra\n").unwrap();
    let h = harness(dir.path());
    h.properties
        .set(CONFIGURATION_FILE_PROPERTY, "base.conf,classpath:extra.lines");

    let config = h.resolver.get_configuration(None, None).unwrap();
    assert_eq!(config.name(), "Composite[base,extra]");

    h.properties
        .set(CONFIGURATION_FILE_PROPERTY, "base.conf,missing.conf");
    assert!(h.resolver.get_configuration(None, None).is_err());
}

#[test]
fn test_parse_error_falls_back_to_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("log4j2.conf"), "this is not a pair\n").unwrap();
    let h = harness(dir.path());

    let config = h.resolver.get_configuration(None, None).unwrap();
    assert!(config.is_default());
    assert!(h.status.contains(StatusLevel::Error, "bad line"));
}

#[test]
fn test_providers_from_disk() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    for (dir, version) in [(&first, "2.6.0"), (&second, "2.4.1")] {
        fs::create_dir_all(dir.path().join("META-INF")).unwrap();
        fs::write(
            dir.path().join(PROVIDER_RESOURCE),
            format!("Log4jAPIVersion: \"{}\"\nFactoryPriority: 15\n", version),
        )
        .unwrap();
    }

    let loader = FileSystemLoader::new([first.path(), second.path()]);
    let registry = ProviderRegistry::new(
        LoadingContext::new("disk", Arc::new(loader)),
        Arc::new(MemoryStatusLogger::new()),
    );

    let providers = registry.providers();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].priority(), 15);
    assert!(providers[0].origin().to_string().contains(&first.path().display().to_string()));
}
