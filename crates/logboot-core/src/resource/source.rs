//! Loaded configuration bytes and where they came from

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use super::error::{LoadError, LoadResult};

/// Where a configuration source was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    Url(Url),
    /// Bytes supplied directly, with no location
    Unknown,
}

impl Origin {
    /// Build an origin from a URL, preferring a file path for `file:` URLs
    pub fn from_url(url: Url) -> Self {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return Origin::File(path);
            }
        }
        Origin::Url(url)
    }

    /// Location string used for type-token matching
    pub fn location(&self) -> Option<String> {
        match self {
            Origin::File(path) => Some(path.display().to_string()),
            Origin::Url(url) => Some(url.to_string()),
            Origin::Unknown => None,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::File(path) => write!(f, "{}", path.display()),
            Origin::Url(url) => write!(f, "{}", url),
            Origin::Unknown => write!(f, "unknown source"),
        }
    }
}

/// Configuration bytes plus their origin
///
/// The bytes are shared, so handing the same source to several factories in
/// turn does not copy or re-read anything.
#[derive(Clone)]
pub struct ConfigurationSource {
    data: Arc<[u8]>,
    origin: Origin,
}

impl ConfigurationSource {
    pub fn new(data: impl Into<Vec<u8>>, origin: Origin) -> Self {
        Self {
            data: Arc::from(data.into()),
            origin,
        }
    }

    /// Source with no location
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(data, Origin::Unknown)
    }

    /// Read a whole file
    pub fn read_file(path: &Path) -> LoadResult<Self> {
        let data = fs::read(path).map_err(|e| LoadError::io(path.display().to_string(), e))?;
        Ok(Self::new(data, Origin::File(path.to_path_buf())))
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The bytes as UTF-8 text
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn location(&self) -> Option<String> {
        self.origin.location()
    }
}

impl std::fmt::Debug for ConfigurationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationSource")
            .field("origin", &self.origin)
            .field("len", &self.data.len())
            .finish()
    }
}
