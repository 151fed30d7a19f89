//! File system resource loader

use std::path::{Path, PathBuf};

use super::error::LoadResult;
use super::loader::ResourceLoader;
use super::source::ConfigurationSource;

/// Resolves resource names against a list of root directories
///
/// Roots are searched in order; `load_resource` returns the first hit and
/// `find_resources` one entry per root that has the resource.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    roots: Vec<PathBuf>,
}

impl FileSystemLoader {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Loader rooted at the process's working directory
    pub fn current_dir() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new([root])
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        let relative = Path::new(name.trim_start_matches('/'));
        self.roots
            .iter()
            .map(move |root| root.join(relative))
            .filter(|path| path.is_file())
    }
}

impl ResourceLoader for FileSystemLoader {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn load_resource(&self, name: &str) -> LoadResult<Option<ConfigurationSource>> {
        match self.candidates(name).next() {
            Some(path) => ConfigurationSource::read_file(&path).map(Some),
            None => Ok(None),
        }
    }

    fn find_resources(&self, name: &str) -> Vec<LoadResult<ConfigurationSource>> {
        self.candidates(name)
            .map(|path| ConfigurationSource::read_file(&path))
            .collect()
    }
}
