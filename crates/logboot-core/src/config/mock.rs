//! Mock configuration factory for testing
//!
//! Accepts, declines or fails on demand and records every source it was
//! asked to parse. No file format is involved; the "configuration" is the
//! source text.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use super::configuration::{Configuration, SharedConfiguration};
use super::factory::{
    open_and_parse, ConfigurationFactory, FactoryError, FactoryRequest, FactoryResult,
};
use crate::resource::ConfigurationSource;

/// How the mock factory answers parse requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MockMode {
    /// Produce a `MockConfiguration` for every source
    #[default]
    Accept,
    /// Return nothing
    Decline,
    /// Return a parse error with this message
    Fail(String),
}

/// Configuration produced by [`MockConfigurationFactory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfiguration {
    factory: String,
    location: Option<String>,
    content: String,
}

impl MockConfiguration {
    pub fn new(factory: impl Into<String>, location: Option<String>, content: impl Into<String>) -> Self {
        Self {
            factory: factory.into(),
            location,
            content: content.into(),
        }
    }

    /// Name of the factory that produced it
    pub fn factory(&self) -> &str {
        &self.factory
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Configuration for MockConfiguration {
    fn name(&self) -> &str {
        &self.factory
    }

    fn location(&self) -> Option<String> {
        self.location.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Mock configuration factory
pub struct MockConfigurationFactory {
    name: String,
    types: Vec<String>,
    mode: MockMode,
    active: bool,
    direct: Option<String>,
    parsed: Mutex<Vec<Option<String>>>,
}

impl MockConfigurationFactory {
    /// Accepting factory for the given type tokens
    pub fn new(name: impl Into<String>, types: &[&str]) -> Self {
        Self {
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
            mode: MockMode::Accept,
            active: true,
            direct: None,
            parsed: Mutex::new(Vec::new()),
        }
    }

    /// Factory that declines every source
    pub fn declining(name: impl Into<String>, types: &[&str]) -> Self {
        Self::new(name, types).with_mode(MockMode::Decline)
    }

    /// Factory that fails on every source
    pub fn failing(name: impl Into<String>, types: &[&str], message: impl Into<String>) -> Self {
        Self::new(name, types).with_mode(MockMode::Fail(message.into()))
    }

    pub fn with_mode(mut self, mode: MockMode) -> Self {
        self.mode = mode;
        self
    }

    /// Report the factory as inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Answer location-less requests with a configuration holding `content`
    pub fn answering_directly(mut self, content: impl Into<String>) -> Self {
        self.direct = Some(content.into());
        self
    }

    /// Locations of every source handed to `parse`, in order
    pub fn parsed_locations(&self) -> Vec<Option<String>> {
        self.parsed.lock().clone()
    }

    pub fn parse_count(&self) -> usize {
        self.parsed.lock().len()
    }
}

impl ConfigurationFactory for MockConfigurationFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_types(&self) -> &[String] {
        &self.types
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn parse(&self, source: &ConfigurationSource) -> FactoryResult<Option<SharedConfiguration>> {
        let location = source.location();
        self.parsed.lock().push(location.clone());

        match &self.mode {
            MockMode::Accept => {
                let content = String::from_utf8_lossy(source.data()).into_owned();
                let config: SharedConfiguration =
                    Arc::new(MockConfiguration::new(&self.name, location, content));
                Ok(Some(config))
            }
            MockMode::Decline => Ok(None),
            MockMode::Fail(message) => Err(FactoryError::parse(
                &self.name,
                location.unwrap_or_else(|| source.origin().to_string()),
                message.clone(),
            )),
        }
    }

    fn configuration_for(
        &self,
        request: &FactoryRequest<'_>,
    ) -> FactoryResult<Option<SharedConfiguration>> {
        if request.location.is_none() && self.active {
            if let Some(content) = &self.direct {
                let config: SharedConfiguration =
                    Arc::new(MockConfiguration::new(&self.name, None, content.clone()));
                return Ok(Some(config));
            }
        }
        open_and_parse(self, request)
    }
}

impl std::fmt::Debug for MockConfigurationFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockConfigurationFactory")
            .field("name", &self.name)
            .field("types", &self.types)
            .field("mode", &self.mode)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{LoadingContext, MemoryResourceLoader};
    use crate::status::NoOpStatusLogger;

    #[test]
    fn test_accept() {
        let factory = MockConfigurationFactory::new("xml", &[".xml"]);
        let config = factory
            .parse(&ConfigurationSource::from_bytes("<Configuration/>"))
            .unwrap()
            .unwrap();

        let mock = config.as_any().downcast_ref::<MockConfiguration>().unwrap();
        assert_eq!(mock.factory(), "xml");
        assert_eq!(mock.content(), "<Configuration/>");
        assert_eq!(factory.parsed_locations(), vec![None]);
    }

    #[test]
    fn test_decline_and_fail() {
        let source = ConfigurationSource::from_bytes("{}");
        let declining = MockConfigurationFactory::declining("json", &[".json"]);
        assert!(declining.parse(&source).unwrap().is_none());

        let failing = MockConfigurationFactory::failing("json", &[".json"], "unexpected token");
        let err = failing.parse(&source).unwrap_err();
        assert!(err.to_string().contains("unexpected token"));
        assert_eq!(failing.parse_count(), 1);
    }

    #[test]
    fn test_direct_answer() {
        let context = LoadingContext::new("test", Arc::new(MemoryResourceLoader::new()));
        let status = NoOpStatusLogger::new();
        let request = FactoryRequest {
            name: Some("app"),
            location: None,
            context: &context,
            status: &status,
        };

        let plain = MockConfigurationFactory::new("any", &["*"]);
        assert!(plain.configuration_for(&request).unwrap().is_none());

        let direct = MockConfigurationFactory::new("any", &["*"]).answering_directly("built-in");
        let config = direct.configuration_for(&request).unwrap().unwrap();
        assert!(config.location().is_none());

        let inactive = MockConfigurationFactory::new("any", &["*"])
            .answering_directly("built-in")
            .inactive();
        assert!(inactive.configuration_for(&request).unwrap().is_none());
    }
}
