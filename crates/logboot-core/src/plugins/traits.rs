//! Plugin registry trait definition

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur when turning a candidate into an instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// The candidate's constructor failed
    #[error("Unable to create plugin {name}: {message}")]
    Instantiation { name: String, message: String },

    /// No candidate with this name exists in the category
    #[error("No {category} plugin named {name}")]
    UnknownPlugin { category: String, name: String },
}

impl PluginError {
    pub fn instantiation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Instantiation {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type PluginResult<T> = Result<T, PluginError>;

/// Constructor function type for plugin candidates
pub type PluginConstructor<T> = Arc<dyn Fn() -> PluginResult<T> + Send + Sync>;

/// A named, ranked way of building one plugin instance
pub struct PluginCandidate<T> {
    /// Unique name within the category
    pub name: String,
    /// Ordering key; lower ranks are tried first
    pub rank: i32,
    constructor: PluginConstructor<T>,
}

impl<T> PluginCandidate<T> {
    pub fn new<F>(name: impl Into<String>, rank: i32, constructor: F) -> Self
    where
        F: Fn() -> PluginResult<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            rank,
            constructor: Arc::new(constructor),
        }
    }

    /// Run the constructor
    pub fn instantiate(&self) -> PluginResult<T> {
        (self.constructor)()
    }
}

impl<T> Clone for PluginCandidate<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rank: self.rank,
            constructor: Arc::clone(&self.constructor),
        }
    }
}

impl<T> std::fmt::Debug for PluginCandidate<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCandidate")
            .field("name", &self.name)
            .field("rank", &self.rank)
            .finish()
    }
}

/// Source of plugin candidates, grouped by capability category
///
/// Candidates come back in discovery order with their rank attached;
/// ordering by rank is the caller's job.
pub trait PluginRegistry<T>: Send + Sync {
    /// Every candidate registered under a category
    fn candidates(&self, category: &str) -> Vec<PluginCandidate<T>>;

    /// Find one candidate by name
    fn lookup(&self, category: &str, name: &str) -> PluginResult<PluginCandidate<T>> {
        self.candidates(category)
            .into_iter()
            .find(|candidate| candidate.name == name)
            .ok_or_else(|| PluginError::UnknownPlugin {
                category: category.to_string(),
                name: name.to_string(),
            })
    }
}

/// Type alias for an Arc-wrapped plugin registry
pub type SharedPluginRegistry<T> = Arc<dyn PluginRegistry<T>>;
