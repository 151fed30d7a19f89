//! Configuration resolution
//!
//! Stages, in order:
//! 1. an explicit location, dispatched by suffix
//! 2. without one, the `log4j.configurationFile` property (a comma
//!    separated value yields a composite), or else every wildcard factory
//!    asked directly
//! 3. conventional names: `log4j2-test<name>`, `log4j2-test`, `log4j2<name>`,
//!    `log4j2`, each with every suffix of every factory
//! 4. [`DefaultConfiguration`]

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

use super::catalog::FactoryCatalog;
use super::configuration::{CompositeConfiguration, DefaultConfiguration, SharedConfiguration};
use super::factory::{
    ConfigurationFactory, FactoryDescriptor, FactoryError, FactoryRequest, FactoryResult,
    SharedConfigurationFactory, CONFIGURATION_FILE_PROPERTY,
};
use super::registry::factory_registry;
use crate::plugins::SharedPluginRegistry;
use crate::properties::{ChainPropertySource, SharedPropertySource};
use crate::resource::{ConfigurationSource, LoadingContext, Location, Locator};
use crate::status::{ConsoleStatusLogger, SharedStatusLogger, StatusLogger, STATUS_LEVEL_ENV};
use crate::{status_debug, status_error};

/// Conventional name prefix tried first
pub const TEST_PREFIX: &str = "log4j2-test";

/// Conventional name prefix tried after [`TEST_PREFIX`]
pub const DEFAULT_PREFIX: &str = "log4j2";

static GLOBAL: Lazy<ConfigurationResolver> = Lazy::new(|| {
    ConfigurationResolver::new(
        factory_registry(),
        Arc::new(ChainPropertySource::standard()),
        LoadingContext::current_dir(),
        Arc::new(ConsoleStatusLogger::new()),
    )
});

/// Errors that cross the resolution boundary
///
/// Everything else is reported to the status logger and ends in the
/// default configuration.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// One location of a composite override produced nothing
    #[error("Failed to create configuration at {location}; composite configuration abandoned")]
    CompositeAborted { location: String },

    /// The single override location produced nothing
    #[error("No configuration could be created from {location}")]
    OverrideUnresolved { location: String },

    /// A custom active factory returned nothing
    #[error("Configuration factory {factory} declined the request")]
    Declined { factory: String },

    #[error(transparent)]
    Factory(#[from] FactoryError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// The built-in factory that runs the resolution pipeline
///
/// It dispatches to the factories of its [`FactoryCatalog`] and never
/// appears in that catalog itself.
pub struct ResolvingFactory {
    catalog: Arc<FactoryCatalog>,
    properties: SharedPropertySource,
    status: SharedStatusLogger,
}

impl ResolvingFactory {
    pub const NAME: &'static str = "resolving";

    pub fn new(
        catalog: Arc<FactoryCatalog>,
        properties: SharedPropertySource,
        status: SharedStatusLogger,
    ) -> Self {
        Self {
            catalog,
            properties,
            status,
        }
    }

    /// Run the pipeline; falls back to the default configuration
    pub fn resolve(&self, request: &FactoryRequest<'_>) -> ResolveResult<SharedConfiguration> {
        let factories = self.catalog.factories();
        let status = request.status;
        let locator = Locator::new(request.context, status);
        let name = request.name.filter(|n| !n.is_empty());

        match request.location {
            Some(location) => {
                if let Some(config) = self.resolve_explicit(&factories, location, &locator) {
                    return Ok(config);
                }
            }
            None => {
                if let Some(raw) = self.properties.get_property(CONFIGURATION_FILE_PROPERTY) {
                    return self.resolve_override(&factories, &raw, &locator);
                }
                if let Some(config) = self.ask_wildcards(&factories, request) {
                    return Ok(config);
                }
            }
        }

        if let Some(config) = self.probe(&factories, name, &locator) {
            return Ok(config);
        }

        status_error!(
            status,
            "No configuration file found. Using default configuration: logging only errors \
             to the console. Set {}=trace to show initialization logging.",
            STATUS_LEVEL_ENV
        );
        Ok(Arc::new(DefaultConfiguration::new()))
    }

    fn resolve_explicit(
        &self,
        factories: &[FactoryDescriptor],
        location: &Location,
        locator: &Locator<'_>,
    ) -> Option<SharedConfiguration> {
        let status = locator.status();

        if let Some(resource) = location.resource_path() {
            if let Some(source) = locator.open_resource(resource) {
                if let Some(config) = self.dispatch_source(factories, &source, status) {
                    return Some(config);
                }
            }
        }

        let source = locator.open(location)?;
        self.first_accepting(factories, &source, &location.to_string(), status)
    }

    fn resolve_override(
        &self,
        factories: &[FactoryDescriptor],
        raw: &str,
        locator: &Locator<'_>,
    ) -> ResolveResult<SharedConfiguration> {
        let status = locator.status();
        let locations: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if locations.len() > 1 {
            let mut children = Vec::with_capacity(locations.len());
            for location in &locations {
                match self.resolve_single(factories, location, locator) {
                    Some(config) => children.push(config),
                    None => {
                        status_error!(status, "Failed to create configuration at {}", location);
                        return Err(ResolveError::CompositeAborted {
                            location: location.to_string(),
                        });
                    }
                }
            }
            return Ok(Arc::new(CompositeConfiguration::new(children)));
        }

        let location = locations.first().copied().unwrap_or(raw);
        self.resolve_single(factories, location, locator)
            .ok_or_else(|| ResolveError::OverrideUnresolved {
                location: location.to_string(),
            })
    }

    fn resolve_single(
        &self,
        factories: &[FactoryDescriptor],
        location: &str,
        locator: &Locator<'_>,
    ) -> Option<SharedConfiguration> {
        let source = locator.open_str(location)?;
        self.first_accepting(factories, &source, location, locator.status())
    }

    fn ask_wildcards(
        &self,
        factories: &[FactoryDescriptor],
        request: &FactoryRequest<'_>,
    ) -> Option<SharedConfiguration> {
        for descriptor in factories.iter().filter(|d| d.accepts_all()) {
            match descriptor.configuration_for(request) {
                Ok(Some(config)) => return Some(config),
                Ok(None) => {}
                Err(e) => status_error!(request.status, "{}", e),
            }
        }
        None
    }

    fn probe(
        &self,
        factories: &[FactoryDescriptor],
        name: Option<&str>,
        locator: &Locator<'_>,
    ) -> Option<SharedConfiguration> {
        let mut passes = vec![
            (TEST_PREFIX, name),
            (TEST_PREFIX, None),
            (DEFAULT_PREFIX, name),
            (DEFAULT_PREFIX, None),
        ];
        passes.dedup();

        passes
            .into_iter()
            .find_map(|(prefix, name)| self.probe_pass(factories, prefix, name, locator))
    }

    /// Parse of the first conventional resource found, if any
    fn probe_pass(
        &self,
        factories: &[FactoryDescriptor],
        prefix: &str,
        name: Option<&str>,
        locator: &Locator<'_>,
    ) -> Option<SharedConfiguration> {
        let status = locator.status();
        for descriptor in factories.iter().filter(|d| d.is_active()) {
            for suffix in descriptor.suffixes() {
                let resource = format!("{}{}{}", prefix, name.unwrap_or_default(), suffix);
                if let Some(source) = locator.open_resource(&resource) {
                    status_debug!(status, "Found {} for {}", resource, descriptor.name());
                    return self.parse_with(descriptor, &source, status);
                }
            }
        }
        None
    }

    /// First eligible factory that returns a configuration
    fn first_accepting(
        &self,
        factories: &[FactoryDescriptor],
        source: &ConfigurationSource,
        location: &str,
        status: &dyn StatusLogger,
    ) -> Option<SharedConfiguration> {
        factories
            .iter()
            .filter(|d| d.matches(location))
            .find_map(|descriptor| self.parse_with(descriptor, source, status))
    }

    /// Hand a source to the first eligible factory only
    fn dispatch_source(
        &self,
        factories: &[FactoryDescriptor],
        source: &ConfigurationSource,
        status: &dyn StatusLogger,
    ) -> Option<SharedConfiguration> {
        let location = source.location();
        let eligible = factories.iter().find(|d| match &location {
            Some(location) => d.matches(location),
            None => d.accepts_all(),
        });

        let Some(descriptor) = eligible else {
            status_error!(status, "No configuration factory supports {}", source.origin());
            return None;
        };
        let config = self.parse_with(descriptor, source, status);
        match &config {
            Some(_) => status_debug!(status, "Loaded configuration from {}", source.origin()),
            None => status_error!(
                status,
                "Cannot determine the configuration factory to use for {}",
                source.origin()
            ),
        }
        config
    }

    fn parse_with(
        &self,
        descriptor: &FactoryDescriptor,
        source: &ConfigurationSource,
        status: &dyn StatusLogger,
    ) -> Option<SharedConfiguration> {
        match descriptor.parse(source) {
            Ok(config) => config,
            Err(e) => {
                status_error!(status, "{}", e);
                None
            }
        }
    }
}

impl ConfigurationFactory for ResolvingFactory {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supported_types(&self) -> &[String] {
        &[]
    }

    /// Dispatch an open source to the first factory eligible for it
    fn parse(&self, source: &ConfigurationSource) -> FactoryResult<Option<SharedConfiguration>> {
        let factories = self.catalog.factories();
        Ok(self.dispatch_source(&factories, source, &*self.status))
    }

    fn configuration_for(
        &self,
        request: &FactoryRequest<'_>,
    ) -> FactoryResult<Option<SharedConfiguration>> {
        match self.resolve(request) {
            Ok(config) => Ok(Some(config)),
            Err(ResolveError::Factory(e)) => Err(e),
            Err(e) => {
                status_error!(request.status, "{}", e);
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for ResolvingFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvingFactory")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

/// Entry point: turns a (name, location) pair into a configuration
///
/// Requests go to the active factory, which is the built-in
/// [`ResolvingFactory`] unless one was set with
/// [`set_active_factory`](Self::set_active_factory).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use logboot_core::config::{
///     ConfigurationResolver, MockConfigurationFactory, SharedConfigurationFactory, CATEGORY,
/// };
/// use logboot_core::plugins::{PluginCandidate, StaticPluginRegistry};
/// use logboot_core::properties::MemoryPropertySource;
/// use logboot_core::resource::{LoadingContext, MemoryResourceLoader};
/// use logboot_core::status::NoOpStatusLogger;
///
/// let plugins = Arc::new(StaticPluginRegistry::<SharedConfigurationFactory>::new());
/// plugins.register(CATEGORY, PluginCandidate::new("xml", 5, || {
///     Ok(Arc::new(MockConfigurationFactory::new("xml", &[".xml"])) as SharedConfigurationFactory)
/// }));
///
/// let loader = Arc::new(MemoryResourceLoader::new());
/// loader.add_resource("log4j2.xml", "<Configuration/>");
///
/// let resolver = ConfigurationResolver::new(
///     plugins,
///     Arc::new(MemoryPropertySource::new()),
///     LoadingContext::new("app", loader),
///     Arc::new(NoOpStatusLogger::new()),
/// );
/// let config = resolver.get_configuration(None, None).unwrap();
/// assert_eq!(config.name(), "xml");
/// ```
pub struct ConfigurationResolver {
    catalog: Arc<FactoryCatalog>,
    resolving: Arc<ResolvingFactory>,
    active: RwLock<Option<SharedConfigurationFactory>>,
    context: LoadingContext,
    status: SharedStatusLogger,
}

impl ConfigurationResolver {
    pub fn new(
        plugins: SharedPluginRegistry<SharedConfigurationFactory>,
        properties: SharedPropertySource,
        context: LoadingContext,
        status: SharedStatusLogger,
    ) -> Self {
        let catalog = Arc::new(FactoryCatalog::new(plugins, properties.clone(), status.clone()));
        let resolving = Arc::new(ResolvingFactory::new(
            Arc::clone(&catalog),
            properties,
            status.clone(),
        ));
        Self {
            catalog,
            resolving,
            active: RwLock::new(None),
            context,
            status,
        }
    }

    /// Process-wide resolver over the global factory table
    pub fn global() -> &'static ConfigurationResolver {
        &GLOBAL
    }

    /// Resolve a configuration in the calling thread's loading context
    ///
    /// An empty name counts as no name. A location that cannot be parsed
    /// is reported and ignored.
    pub fn get_configuration(
        &self,
        name: Option<&str>,
        location: Option<&str>,
    ) -> ResolveResult<SharedConfiguration> {
        let location = location.and_then(|raw| match Location::parse(raw) {
            Ok(location) => Some(location),
            Err(e) => {
                status_error!(self.status, "Ignoring configuration location: {}", e);
                None
            }
        });
        let context = self.find_loading_context();
        self.get_configuration_in(name, location.as_ref(), &context)
    }

    /// Resolve a configuration in an explicit loading context
    pub fn get_configuration_in(
        &self,
        name: Option<&str>,
        location: Option<&Location>,
        context: &LoadingContext,
    ) -> ResolveResult<SharedConfiguration> {
        let request = FactoryRequest {
            name: name.filter(|n| !n.is_empty()),
            location,
            context,
            status: &*self.status,
        };

        let custom = self.active.read().clone();
        match custom {
            None => self.resolving.resolve(&request),
            Some(factory) => factory
                .configuration_for(&request)?
                .ok_or_else(|| ResolveError::Declined {
                    factory: factory.name().to_string(),
                }),
        }
    }

    /// The factory requests are currently sent to
    ///
    /// Makes sure the factory list has been discovered first.
    pub fn active_factory(&self) -> SharedConfigurationFactory {
        let factories = self.catalog.factories();
        let active = self.current_active();
        status_debug!(
            self.status,
            "Using configuration factory {} over {} discovered",
            active.name(),
            factories.len()
        );
        active
    }

    pub fn set_active_factory(&self, factory: SharedConfigurationFactory) {
        *self.active.write() = Some(factory);
    }

    /// Go back to the built-in factory if `factory` is the active one
    pub fn remove_active_factory(&self, factory: &SharedConfigurationFactory) -> bool {
        let mut active = self.active.write();
        let is_current = active
            .as_ref()
            .map(|current| same_factory(current, factory))
            .unwrap_or(false);
        if is_current {
            *active = None;
        }
        is_current
    }

    pub fn reset_active_factory(&self) {
        *self.active.write() = None;
    }

    /// The frozen, ranked factory list
    pub fn factories(&self) -> Arc<Vec<FactoryDescriptor>> {
        self.catalog.factories()
    }

    pub fn catalog(&self) -> &FactoryCatalog {
        &self.catalog
    }

    /// The thread's entered loading context, or the resolver's own
    pub fn find_loading_context(&self) -> LoadingContext {
        LoadingContext::current().unwrap_or_else(|| self.context.clone())
    }

    /// Forget the discovered factories; the active factory is kept
    pub fn reset(&self) {
        self.catalog.reset();
    }

    fn current_active(&self) -> SharedConfigurationFactory {
        match self.active.read().as_ref() {
            Some(factory) => Arc::clone(factory),
            None => Arc::clone(&self.resolving) as SharedConfigurationFactory,
        }
    }
}

impl std::fmt::Debug for ConfigurationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationResolver")
            .field("catalog", &self.catalog)
            .field("active", &self.current_active().name())
            .field("context", &self.context)
            .finish()
    }
}

fn same_factory(a: &SharedConfigurationFactory, b: &SharedConfigurationFactory) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
