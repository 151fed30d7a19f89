//! Logging back-end providers
//!
//! Providers announce themselves through `META-INF/logboot-provider.yaml`
//! manifests. The `ProviderRegistry` reads them once, on first use.

mod descriptor;
mod discovery;
mod registry;

pub use descriptor::{
    is_compatible_version, ProviderDescriptor, ProviderError, ProviderResult,
    COMPATIBLE_API_VERSIONS, DEFAULT_PRIORITY, PROVIDER_RESOURCE,
};
pub use discovery::{ManifestDiscovery, ProviderDiscovery};
pub use registry::ProviderRegistry;
