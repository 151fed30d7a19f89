//! Configuration factory trait definition

use std::sync::Arc;

use thiserror::Error;

use super::configuration::SharedConfiguration;
use crate::resource::{ConfigurationSource, LoadError, LoadingContext, Location, Locator};
use crate::status::StatusLogger;

/// Type token a factory declares to accept any location
pub const ALL_TYPES: &str = "*";

/// Plugin category configuration factories are registered under
pub const CATEGORY: &str = "ConfigurationFactory";

/// Property naming a factory to try before all others
pub const CONFIGURATION_FACTORY_PROPERTY: &str = "log4j.configurationFactory";

/// Property naming the configuration location(s), comma separated
pub const CONFIGURATION_FILE_PROPERTY: &str = "log4j.configurationFile";

/// Errors that can occur inside a configuration factory
#[derive(Error, Debug)]
pub enum FactoryError {
    /// The source was recognized but could not be parsed
    #[error("{factory} could not parse {location}: {message}")]
    Parse {
        factory: String,
        location: String,
        message: String,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{0}")]
    Other(String),
}

impl FactoryError {
    pub fn parse(
        factory: impl Into<String>,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            factory: factory.into(),
            location: location.into(),
            message: message.into(),
        }
    }
}

pub type FactoryResult<T> = Result<T, FactoryError>;

/// What a caller is asking a factory for
#[derive(Clone, Copy)]
pub struct FactoryRequest<'a> {
    /// Configuration name; never empty
    pub name: Option<&'a str>,
    pub location: Option<&'a Location>,
    pub context: &'a LoadingContext,
    pub status: &'a dyn StatusLogger,
}

impl std::fmt::Debug for FactoryRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRequest")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Turns configuration sources into configurations
///
/// A factory declares the location suffixes it understands (`.xml`,
/// `.json`, …) or [`ALL_TYPES`]. Returning `Ok(None)` declines the source
/// and lets the next factory try.
pub trait ConfigurationFactory: Send + Sync {
    fn name(&self) -> &str;

    /// Location suffixes this factory accepts, in probe order
    fn supported_types(&self) -> &[String];

    /// Inactive factories decline every request
    fn is_active(&self) -> bool {
        true
    }

    fn parse(&self, source: &ConfigurationSource) -> FactoryResult<Option<SharedConfiguration>>;

    /// Configuration for a name and an optional location
    ///
    /// The default opens the location, preferring the loading context for
    /// resource-like locations, and parses it. Without a location it
    /// declines.
    fn configuration_for(
        &self,
        request: &FactoryRequest<'_>,
    ) -> FactoryResult<Option<SharedConfiguration>> {
        open_and_parse(self, request)
    }
}

/// Type alias for an Arc-wrapped configuration factory
pub type SharedConfigurationFactory = Arc<dyn ConfigurationFactory>;

/// Default [`ConfigurationFactory::configuration_for`] behaviour
pub fn open_and_parse<F>(
    factory: &F,
    request: &FactoryRequest<'_>,
) -> FactoryResult<Option<SharedConfiguration>>
where
    F: ConfigurationFactory + ?Sized,
{
    if !factory.is_active() {
        return Ok(None);
    }
    let Some(location) = request.location else {
        return Ok(None);
    };
    match Locator::new(request.context, request.status).open_preferring_context(location) {
        Some(source) => factory.parse(&source),
        None => Ok(None),
    }
}

/// A discovered factory with its rank and frozen type tokens
#[derive(Clone)]
pub struct FactoryDescriptor {
    name: String,
    rank: i32,
    types: Vec<String>,
    factory: SharedConfigurationFactory,
}

impl FactoryDescriptor {
    pub fn new(name: impl Into<String>, rank: i32, factory: SharedConfigurationFactory) -> Self {
        Self {
            name: name.into(),
            rank,
            types: factory.supported_types().to_vec(),
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn factory(&self) -> &SharedConfigurationFactory {
        &self.factory
    }

    pub fn accepts_all(&self) -> bool {
        self.types.iter().any(|t| t == ALL_TYPES)
    }

    /// Whether the factory is eligible for a location string
    pub fn matches(&self, location: &str) -> bool {
        self.types
            .iter()
            .any(|t| t == ALL_TYPES || location.ends_with(t.as_str()))
    }

    /// Non-wildcard tokens, in declared order
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .map(String::as_str)
            .filter(|t| *t != ALL_TYPES)
    }

    pub fn is_active(&self) -> bool {
        self.factory.is_active()
    }

    /// Parse a source; inactive factories decline
    pub fn parse(&self, source: &ConfigurationSource) -> FactoryResult<Option<SharedConfiguration>> {
        if !self.is_active() {
            return Ok(None);
        }
        self.factory.parse(source)
    }

    /// Ask for a configuration by name and location; inactive factories decline
    pub fn configuration_for(
        &self,
        request: &FactoryRequest<'_>,
    ) -> FactoryResult<Option<SharedConfiguration>> {
        if !self.is_active() {
            return Ok(None);
        }
        self.factory.configuration_for(request)
    }
}

impl std::fmt::Debug for FactoryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryDescriptor")
            .field("name", &self.name)
            .field("rank", &self.rank)
            .field("types", &self.types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfigurationFactory;
    use crate::resource::MemoryResourceLoader;
    use crate::status::MemoryStatusLogger;

    fn descriptor(types: &[&str]) -> FactoryDescriptor {
        FactoryDescriptor::new("f", 1, Arc::new(MockConfigurationFactory::new("f", types)))
    }

    #[test]
    fn test_matches() {
        let xml = descriptor(&[".xml"]);
        assert!(xml.matches("conf/log4j2.xml"));
        assert!(!xml.matches("conf/log4j2.json"));
        assert!(!xml.accepts_all());

        let any = descriptor(&[".json", ALL_TYPES]);
        assert!(any.matches("anything.properties"));
        assert!(any.accepts_all());
        assert_eq!(any.suffixes().collect::<Vec<_>>(), vec![".json"]);
    }

    #[test]
    fn test_inactive_descriptor_declines() {
        let factory = Arc::new(MockConfigurationFactory::new("f", &[".xml"]).inactive());
        let descriptor = FactoryDescriptor::new("f", 1, factory.clone());
        let source = ConfigurationSource::from_bytes("<Configuration/>");

        assert!(descriptor.parse(&source).unwrap().is_none());
        assert_eq!(factory.parse_count(), 0);
    }

    #[test]
    fn test_open_and_parse() {
        let loader = Arc::new(MemoryResourceLoader::new());
        loader.add_resource("app.xml", "<Configuration/>");
        let context = LoadingContext::new("test", loader);
        let status = MemoryStatusLogger::new();
        let factory = MockConfigurationFactory::new("xml", &[".xml"]);

        let location = Location::parse("classpath:app.xml").unwrap();
        let request = FactoryRequest {
            name: None,
            location: Some(&location),
            context: &context,
            status: &status,
        };
        let config = factory.configuration_for(&request).unwrap().unwrap();
        assert!(config.location().unwrap().ends_with("app.xml"));

        let request = FactoryRequest {
            location: None,
            ..request
        };
        assert!(factory.configuration_for(&request).unwrap().is_none());
    }
}
