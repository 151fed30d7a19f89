//! Logboot Core
//!
//! Logging-configuration bootstrap: decides, once per process, which
//! configuration source to load and which factory parses it.
//!
//! ## Resolution
//!
//! A `ConfigurationResolver` turns a (name, location) pair into a
//! configuration, falling back through the `log4j.configurationFile`
//! property, wildcard factories, conventional file names and finally a
//! built-in default:
//!
//! ```rust,ignore
//! use logboot_core::config::{register_configuration_factory, ConfigurationResolver};
//!
//! register_configuration_factory("xml", 5, || Ok(Arc::new(XmlFactory::new())));
//!
//! let config = ConfigurationResolver::global().get_configuration(Some("app"), None)?;
//! ```
//!
//! ## Providers
//!
//! A `ProviderRegistry` discovers `META-INF/logboot-provider.yaml`
//! manifests on first use, under an interruptible startup lock a hosting
//! framework can hold while it installs providers itself.

pub mod sync;
pub mod status;
pub mod properties;
pub mod resource;
pub mod plugins;
pub mod provider;
pub mod config;

// Re-export commonly used types
pub use status::{
    ConsoleStatusLogger, MemoryStatusLogger, NoOpStatusLogger, SharedStatusLogger, StatusLevel,
    StatusLogger, TracingStatusLogger,
};

pub use properties::{
    ChainPropertySource, EnvPropertySource, FilePropertySource, MemoryPropertySource,
    PropertySource,
};

pub use resource::{
    ConfigurationSource, FileSystemLoader, LoadError, LoadingContext, Location,
    MemoryResourceLoader, Origin, ResourceLoader,
};

pub use plugins::{PluginCandidate, PluginError, PluginRegistry, StaticPluginRegistry};

pub use provider::{ProviderDescriptor, ProviderRegistry};

pub use config::{
    CompositeConfiguration, Configuration, ConfigurationFactory, ConfigurationResolver,
    DefaultConfiguration, FactoryDescriptor, FactoryError, MockConfigurationFactory,
    ResolveError, SharedConfiguration, SharedConfigurationFactory,
};

pub use sync::{InterruptHandle, Interrupted, StartupLock};
