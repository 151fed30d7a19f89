//! Configuration resources
//!
//! - `ResourceLoader` trait for opening resources, files and URLs
//! - Built-in loaders: `FileSystemLoader`, `MemoryResourceLoader`
//! - `LoadingContext` scoping resource lookups, `Location` parsing and
//!   `Locator` for opening a location with fallbacks

mod error;
mod source;
mod location;
mod loader;
mod context;
mod fs;
mod memory;
mod locator;

pub use error::{LoadError, LoadResult};
pub use source::{ConfigurationSource, Origin};
pub use location::{Location, CLASSLOADER_SCHEME, CLASSPATH_SCHEME};
pub use loader::{ResourceLoader, SharedResourceLoader};
pub use context::{ContextScope, LoadingContext};
pub use fs::FileSystemLoader;
pub use memory::MemoryResourceLoader;
pub use locator::Locator;
