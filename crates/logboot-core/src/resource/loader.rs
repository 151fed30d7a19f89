//! Resource loader trait definition

use std::path::Path;
use std::sync::Arc;

use url::Url;

use super::error::{LoadError, LoadResult};
use super::source::ConfigurationSource;

/// Opens named resources, files and URLs
///
/// Resource names are relative to whatever the loader considers its roots
/// (the equivalent of a class path). Files and URLs are absolute.
///
/// Implementations:
/// - `FileSystemLoader`: resources resolved against a list of directories
/// - `MemoryResourceLoader`: in-memory fixtures, records every lookup
pub trait ResourceLoader: Send + Sync {
    /// Loader name, for diagnostics
    fn name(&self) -> &str;

    /// Load the first resource with this name
    ///
    /// `Ok(None)` means the resource does not exist.
    fn load_resource(&self, name: &str) -> LoadResult<Option<ConfigurationSource>>;

    /// Load every resource with this name, one entry per root
    ///
    /// Each entry fails or succeeds on its own.
    fn find_resources(&self, name: &str) -> Vec<LoadResult<ConfigurationSource>> {
        match self.load_resource(name) {
            Ok(Some(source)) => vec![Ok(source)],
            Ok(None) => Vec::new(),
            Err(e) => vec![Err(e)],
        }
    }

    /// Open a file, returning `Ok(None)` when it does not exist
    fn open_file(&self, path: &Path) -> LoadResult<Option<ConfigurationSource>> {
        if !path.is_file() {
            return Ok(None);
        }
        ConfigurationSource::read_file(path).map(Some)
    }

    /// Open an absolute URL
    fn open_url(&self, url: &Url) -> LoadResult<ConfigurationSource> {
        if url.scheme() != "file" {
            return Err(LoadError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                location: url.to_string(),
            });
        }
        let path = url
            .to_file_path()
            .map_err(|_| LoadError::invalid_location(url.as_str(), "not a local file URL"))?;
        self.open_file(&path)?
            .ok_or_else(|| LoadError::NotFound(url.to_string()))
    }
}

/// Type alias for an Arc-wrapped resource loader
pub type SharedResourceLoader = Arc<dyn ResourceLoader>;
