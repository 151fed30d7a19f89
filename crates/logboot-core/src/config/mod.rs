//! Configuration factories and resolution
//!
//! - `ConfigurationFactory` trait for pluggable parsers
//! - `FactoryCatalog`, the ranked list discovered from a plugin registry
//! - `ConfigurationResolver`, the entry point running the fallback pipeline
//! - `MockConfigurationFactory` for tests

mod configuration;
mod factory;
mod registry;
mod catalog;
mod resolver;
mod mock;

pub use configuration::{
    CompositeConfiguration, Configuration, DefaultConfiguration, SharedConfiguration,
    DEFAULT_CONFIGURATION_NAME,
};
pub use factory::{
    open_and_parse, ConfigurationFactory, FactoryDescriptor, FactoryError, FactoryRequest,
    FactoryResult, SharedConfigurationFactory, ALL_TYPES, CATEGORY,
    CONFIGURATION_FACTORY_PROPERTY, CONFIGURATION_FILE_PROPERTY,
};
pub use registry::{
    factory_registry, has_configuration_factory, list_configuration_factories,
    register_configuration_factory, unregister_configuration_factory,
};
pub use catalog::FactoryCatalog;
pub use resolver::{
    ConfigurationResolver, ResolveError, ResolveResult, ResolvingFactory, DEFAULT_PREFIX,
    TEST_PREFIX,
};
pub use mock::{MockConfiguration, MockConfigurationFactory, MockMode};
