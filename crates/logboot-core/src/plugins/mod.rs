//! Plugin discovery
//!
//! - `PluginRegistry` trait returning ranked candidates per category
//! - `StaticPluginRegistry`, an explicit registration table

mod traits;
mod registry;

pub use traits::{
    PluginCandidate, PluginConstructor, PluginError, PluginRegistry, PluginResult,
    SharedPluginRegistry,
};
pub use registry::StaticPluginRegistry;
