//! Provider manifest discovery

use crate::resource::{ConfigurationSource, LoadResult, LoadingContext};

use super::descriptor::PROVIDER_RESOURCE;

/// Finds candidate provider manifests
///
/// Each entry opens or fails on its own; a failed entry does not stop the
/// others from being read.
pub trait ProviderDiscovery: Send + Sync {
    fn discover(&self, context: &LoadingContext) -> Vec<LoadResult<ConfigurationSource>>;
}

/// Discovers every manifest resource visible to the loading context
#[derive(Debug, Clone)]
pub struct ManifestDiscovery {
    resource: String,
}

impl ManifestDiscovery {
    pub fn new() -> Self {
        Self::with_resource(PROVIDER_RESOURCE)
    }

    /// Look for manifests under a different resource name
    pub fn with_resource(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl Default for ManifestDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderDiscovery for ManifestDiscovery {
    fn discover(&self, context: &LoadingContext) -> Vec<LoadResult<ConfigurationSource>> {
        context.loader().find_resources(&self.resource)
    }
}
