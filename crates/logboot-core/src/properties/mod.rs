//! Bootstrap property sources
//!
//! - `PropertySource` trait for implementing custom sources
//! - Built-in implementations: `EnvPropertySource`, `MemoryPropertySource`,
//!   `FilePropertySource`, `ChainPropertySource`

mod traits;
mod env;
mod memory;
mod file;
mod chain;

pub use traits::{PropertyError, PropertyResult, PropertySource, SharedPropertySource};
pub use env::EnvPropertySource;
pub use memory::MemoryPropertySource;
pub use file::FilePropertySource;
pub use chain::ChainPropertySource;
