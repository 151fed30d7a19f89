//! Process-wide registration table for configuration factories

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::factory::{SharedConfigurationFactory, CATEGORY};
use crate::plugins::{PluginCandidate, PluginRegistry, PluginResult, StaticPluginRegistry};

/// Global table the process-wide resolver discovers factories from
static REGISTRY: Lazy<Arc<StaticPluginRegistry<SharedConfigurationFactory>>> =
    Lazy::new(|| Arc::new(StaticPluginRegistry::new()));

/// The global factory table, as a plugin registry
pub fn factory_registry() -> Arc<StaticPluginRegistry<SharedConfigurationFactory>> {
    Arc::clone(&REGISTRY)
}

/// Register a configuration factory under a name and rank
///
/// Lower ranks are tried first. Registering an existing name replaces it.
/// Factories registered after the global resolver has frozen its list are
/// only seen after [`ConfigurationResolver::reset`](super::ConfigurationResolver::reset).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use logboot_core::config::{
///     has_configuration_factory, register_configuration_factory,
///     unregister_configuration_factory, MockConfigurationFactory,
/// };
///
/// register_configuration_factory("doc-xml", 5, || {
///     Ok(Arc::new(MockConfigurationFactory::new("doc-xml", &[".xml"])))
/// });
/// assert!(has_configuration_factory("doc-xml"));
/// unregister_configuration_factory("doc-xml");
/// ```
pub fn register_configuration_factory<F>(name: &str, rank: i32, constructor: F)
where
    F: Fn() -> PluginResult<SharedConfigurationFactory> + Send + Sync + 'static,
{
    REGISTRY.register(CATEGORY, PluginCandidate::new(name, rank, constructor));
}

/// Unregister a configuration factory (mainly for testing)
pub fn unregister_configuration_factory(name: &str) -> bool {
    REGISTRY.unregister(CATEGORY, name)
}

/// Check if a factory is registered
pub fn has_configuration_factory(name: &str) -> bool {
    REGISTRY.contains(CATEGORY, name)
}

/// List registered factories as (name, rank) pairs, in registration order
pub fn list_configuration_factories() -> Vec<(String, i32)> {
    REGISTRY
        .candidates(CATEGORY)
        .into_iter()
        .map(|candidate| (candidate.name, candidate.rank))
        .collect()
}
