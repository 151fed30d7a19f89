//! Resolved configurations

use std::any::Any;
use std::sync::Arc;

/// Name of the configuration used when nothing else can be found
pub const DEFAULT_CONFIGURATION_NAME: &str = "Default";

/// A parsed logging configuration
///
/// The bootstrap never looks inside; it only hands configurations from
/// factories to callers. Use [`as_any`](Self::as_any) to get the concrete
/// type back.
pub trait Configuration: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Where the configuration was loaded from, if anywhere
    fn location(&self) -> Option<String> {
        None
    }

    /// Whether this is the built-in fallback configuration
    fn is_default(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

/// Type alias for an Arc-wrapped configuration
pub type SharedConfiguration = Arc<dyn Configuration>;

/// Minimal configuration: errors only, to the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultConfiguration {
    name: String,
}

impl DefaultConfiguration {
    /// Root level of the fallback configuration
    pub const ROOT_LEVEL: &'static str = "ERROR";

    /// The single appender of the fallback configuration
    pub const APPENDER: &'static str = "Console";

    pub fn new() -> Self {
        Self {
            name: DEFAULT_CONFIGURATION_NAME.to_string(),
        }
    }
}

impl Default for DefaultConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration for DefaultConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_default(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Several configurations layered in order; later ones override earlier ones
#[derive(Debug, Clone)]
pub struct CompositeConfiguration {
    name: String,
    children: Vec<SharedConfiguration>,
}

impl CompositeConfiguration {
    pub fn new(children: Vec<SharedConfiguration>) -> Self {
        let names: Vec<&str> = children.iter().map(|c| c.name()).collect();
        Self {
            name: format!("Composite[{}]", names.join(",")),
            children,
        }
    }

    /// Children in the order they were listed
    pub fn children(&self) -> &[SharedConfiguration] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Configuration for CompositeConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    /// Child locations, comma separated
    fn location(&self) -> Option<String> {
        let locations: Vec<String> = self.children.iter().filter_map(|c| c.location()).collect();
        (!locations.is_empty()).then(|| locations.join(","))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
