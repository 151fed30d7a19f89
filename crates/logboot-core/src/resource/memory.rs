//! In-memory resource loader

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use url::Url;

use super::error::{LoadError, LoadResult};
use super::loader::ResourceLoader;
use super::source::{ConfigurationSource, Origin};

#[derive(Debug, Clone)]
enum Entry {
    Data(Vec<u8>),
    Broken(String),
}

/// In-memory loader for tests and embedding applications
///
/// Every lookup is recorded, so tests can assert on probe order:
/// resource names as given, files as `file:<path>`, URLs as written.
///
/// # Example
///
/// ```
/// use logboot_core::resource::{MemoryResourceLoader, ResourceLoader};
///
/// let loader = MemoryResourceLoader::new();
/// loader.add_resource("log4j2.xml", "<Configuration/>");
/// assert!(loader.load_resource("log4j2.xml").unwrap().is_some());
/// assert!(loader.load_resource("log4j2.json").unwrap().is_none());
/// assert_eq!(loader.attempts(), vec!["log4j2.xml", "log4j2.json"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryResourceLoader {
    resources: RwLock<HashMap<String, Vec<Entry>>>,
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    urls: RwLock<HashMap<String, Vec<u8>>>,
    attempts: Mutex<Vec<String>>,
}

impl MemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource; adding the same name again simulates another root
    pub fn add_resource(&self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> &Self {
        self.push_entry(name.into(), Entry::Data(data.into()));
        self
    }

    /// Add a resource that exists but fails to read
    pub fn add_broken_resource(&self, name: impl Into<String>, message: impl Into<String>) -> &Self {
        self.push_entry(name.into(), Entry::Broken(message.into()));
        self
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> &Self {
        self.files.write().insert(path.into(), data.into());
        self
    }

    pub fn add_url(&self, url: &str, data: impl Into<Vec<u8>>) -> &Self {
        self.urls.write().insert(url.to_string(), data.into());
        self
    }

    pub fn remove_resource(&self, name: &str) -> bool {
        self.resources.write().remove(name).is_some()
    }

    /// Every lookup made so far, in order
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }

    pub fn clear_attempts(&self) {
        self.attempts.lock().clear();
    }

    fn push_entry(&self, name: String, entry: Entry) {
        let name = name.trim_start_matches('/').to_string();
        self.resources.write().entry(name).or_default().push(entry);
    }

    fn record(&self, attempt: String) {
        self.attempts.lock().push(attempt);
    }

    fn materialize(name: &str, root: usize, entry: &Entry) -> LoadResult<ConfigurationSource> {
        match entry {
            Entry::Data(data) => {
                let origin = Url::parse(&format!("memory://root{}/{}", root, name))
                    .map(Origin::Url)
                    .unwrap_or(Origin::Unknown);
                Ok(ConfigurationSource::new(data.clone(), origin))
            }
            Entry::Broken(message) => Err(LoadError::io(
                name,
                std::io::Error::new(std::io::ErrorKind::Other, message.clone()),
            )),
        }
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_resource(&self, name: &str) -> LoadResult<Option<ConfigurationSource>> {
        self.record(name.to_string());
        let key = name.trim_start_matches('/');
        let resources = self.resources.read();
        match resources.get(key).and_then(|entries| entries.first()) {
            Some(entry) => Self::materialize(key, 0, entry).map(Some),
            None => Ok(None),
        }
    }

    fn find_resources(&self, name: &str) -> Vec<LoadResult<ConfigurationSource>> {
        self.record(name.to_string());
        let key = name.trim_start_matches('/');
        let resources = self.resources.read();
        resources
            .get(key)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(root, entry)| Self::materialize(key, root, entry))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn open_file(&self, path: &Path) -> LoadResult<Option<ConfigurationSource>> {
        self.record(format!("file:{}", path.display()));
        Ok(self
            .files
            .read()
            .get(path)
            .map(|data| ConfigurationSource::new(data.clone(), Origin::File(path.to_path_buf()))))
    }

    fn open_url(&self, url: &Url) -> LoadResult<ConfigurationSource> {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return self
                    .open_file(&path)?
                    .ok_or_else(|| LoadError::NotFound(url.to_string()));
            }
        }
        self.record(url.to_string());
        self.urls
            .read()
            .get(url.as_str())
            .map(|data| ConfigurationSource::new(data.clone(), Origin::Url(url.clone())))
            .ok_or_else(|| LoadError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_origin_keeps_suffix() {
        let loader = MemoryResourceLoader::new();
        loader.add_resource("config/log4j2.json", "{}");
        let source = loader.load_resource("/config/log4j2.json").unwrap().unwrap();
        assert!(source.location().unwrap().ends_with("config/log4j2.json"));
    }

    #[test]
    fn test_multiple_roots() {
        let loader = MemoryResourceLoader::new();
        loader
            .add_resource("META-INF/provider.yaml", "first")
            .add_broken_resource("META-INF/provider.yaml", "permission denied")
            .add_resource("META-INF/provider.yaml", "third");

        let found = loader.find_resources("META-INF/provider.yaml");
        assert_eq!(found.len(), 3);
        assert!(found[0].is_ok());
        assert!(matches!(found[1], Err(LoadError::Io { .. })));
        assert_ne!(
            found[0].as_ref().unwrap().location(),
            found[2].as_ref().unwrap().location()
        );

        let first = loader.load_resource("META-INF/provider.yaml").unwrap().unwrap();
        assert_eq!(first.as_str().unwrap(), "first");
    }

    #[test]
    fn test_files_and_urls() {
        let loader = MemoryResourceLoader::new();
        loader
            .add_file("/etc/app/log4j2.xml", "<file/>")
            .add_url("https://config.example.com/log4j2.xml", "<remote/>");

        let file = loader.open_file(Path::new("/etc/app/log4j2.xml")).unwrap().unwrap();
        assert_eq!(file.as_str().unwrap(), "<file/>");

        let url = Url::parse("file:///etc/app/log4j2.xml").unwrap();
        assert_eq!(loader.open_url(&url).unwrap().as_str().unwrap(), "<file/>");

        let url = Url::parse("https://config.example.com/log4j2.xml").unwrap();
        assert_eq!(loader.open_url(&url).unwrap().as_str().unwrap(), "<remote/>");

        let missing = Url::parse("https://config.example.com/other.xml").unwrap();
        assert!(matches!(loader.open_url(&missing), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_attempts_are_recorded() {
        let loader = MemoryResourceLoader::new();
        let _ = loader.load_resource("a.xml");
        let _ = loader.open_file(Path::new("/tmp/b.xml"));
        assert_eq!(loader.attempts(), vec!["a.xml", "file:/tmp/b.xml"]);

        loader.clear_attempts();
        assert!(loader.attempts().is_empty());
    }
}
