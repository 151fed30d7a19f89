//! Lazily initialized provider registry

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;

use super::descriptor::ProviderDescriptor;
use super::discovery::{ManifestDiscovery, ProviderDiscovery};
use crate::resource::{ConfigurationSource, LoadingContext};
use crate::status::{ConsoleStatusLogger, SharedStatusLogger};
use crate::sync::{interrupt, StartupLock};
use crate::{status_debug, status_error, status_fatal, status_warn};

static GLOBAL: Lazy<ProviderRegistry> = Lazy::new(|| {
    ProviderRegistry::new(
        LoadingContext::current_dir(),
        Arc::new(ConsoleStatusLogger::new()),
    )
});

/// Set of available providers, discovered once on first use
///
/// Discovery runs under the [`StartupLock`]. A hosting framework that wants
/// to install providers itself takes that lock first, calls
/// [`load_provider`](Self::load_provider) for each of them, and releases it;
/// every other thread that touches the registry in the meantime waits, and
/// can be interrupted while it does.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use logboot_core::provider::ProviderRegistry;
/// use logboot_core::resource::{LoadingContext, MemoryResourceLoader};
/// use logboot_core::status::NoOpStatusLogger;
///
/// let loader = Arc::new(MemoryResourceLoader::new());
/// loader.add_resource("META-INF/logboot-provider.yaml", "Log4jAPIVersion: 2.6.0");
///
/// let registry = ProviderRegistry::new(
///     LoadingContext::new("app", loader),
///     Arc::new(NoOpStatusLogger::new()),
/// );
/// assert!(registry.has_providers());
/// ```
pub struct ProviderRegistry {
    lock: StartupLock,
    initialized: AtomicBool,
    providers: ArcSwap<Vec<ProviderDescriptor>>,
    discovery: Arc<dyn ProviderDiscovery>,
    context: LoadingContext,
    status: SharedStatusLogger,
}

impl ProviderRegistry {
    /// Registry discovering manifests through the given context
    pub fn new(context: LoadingContext, status: SharedStatusLogger) -> Self {
        Self::with_discovery(context, Arc::new(ManifestDiscovery::new()), status)
    }

    pub fn with_discovery(
        context: LoadingContext,
        discovery: Arc<dyn ProviderDiscovery>,
        status: SharedStatusLogger,
    ) -> Self {
        Self {
            lock: StartupLock::new(),
            initialized: AtomicBool::new(false),
            providers: ArcSwap::from_pointee(Vec::new()),
            discovery,
            context,
            status,
        }
    }

    /// Process-wide registry rooted at the working directory
    pub fn global() -> &'static ProviderRegistry {
        &GLOBAL
    }

    /// Run discovery unless it already ran
    ///
    /// If the calling thread is interrupted while waiting for the startup
    /// lock, the attempt is abandoned: a fatal status is reported, the
    /// thread's interrupt flag is set again, and the registry stays
    /// uninitialized so a later call can retry.
    pub fn ensure_initialized(&self) {
        if self.initialized.load(Ordering::Acquire) {
            return;
        }

        let _guard = match self.lock.lock_interruptibly() {
            Ok(guard) => guard,
            Err(e) => {
                status_fatal!(self.status, "Interrupted before providers could be loaded: {}", e);
                interrupt::interrupt_current();
                return;
            }
        };

        if self.initialized.load(Ordering::Acquire) {
            return;
        }

        let mut discovered = Vec::new();
        for candidate in self.discovery.discover(&self.context) {
            match candidate {
                Ok(source) => {
                    if let Some(provider) = self.read_manifest(&source, &self.context) {
                        discovered.push(provider);
                    }
                }
                Err(e) => status_error!(self.status, "Unable to open provider manifest: {}", e),
            }
        }

        self.providers.rcu(|current| {
            let mut providers = Vec::clone(current);
            providers.extend(discovered.iter().cloned());
            providers
        });
        self.initialized.store(true, Ordering::Release);
    }

    /// Snapshot of every loaded provider
    pub fn providers(&self) -> Arc<Vec<ProviderDescriptor>> {
        self.ensure_initialized();
        self.providers.load_full()
    }

    pub fn has_providers(&self) -> bool {
        self.ensure_initialized();
        !self.providers.load().is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Read one manifest and add the provider it declares
    ///
    /// Does not trigger discovery, so a host holding the startup lock can
    /// install providers before anyone else looks.
    pub fn load_provider(
        &self,
        source: &ConfigurationSource,
        context: &LoadingContext,
    ) -> Option<ProviderDescriptor> {
        let provider = self.read_manifest(source, context)?;
        self.providers.rcu(|current| {
            let mut providers = Vec::clone(current);
            providers.push(provider.clone());
            providers
        });
        Some(provider)
    }

    /// The lock guarding discovery
    pub fn startup_lock(&self) -> &StartupLock {
        &self.lock
    }

    /// The calling thread's loading context, or the registry's own
    pub fn find_loading_context(&self) -> LoadingContext {
        LoadingContext::current().unwrap_or_else(|| self.context.clone())
    }

    /// Drop every provider and allow discovery to run again
    pub fn reset(&self) {
        let _guard = self.lock.lock();
        self.providers.store(Arc::new(Vec::new()));
        self.initialized.store(false, Ordering::Release);
    }

    fn read_manifest(
        &self,
        source: &ConfigurationSource,
        context: &LoadingContext,
    ) -> Option<ProviderDescriptor> {
        match ProviderDescriptor::from_manifest(source, context) {
            Ok(provider) => {
                status_debug!(self.status, "Loaded {}", provider);
                Some(provider)
            }
            Err(e) => {
                status_warn!(self.status, "{}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("initialized", &self.is_initialized())
            .field("providers", &self.providers.load().len())
            .field("context", &self.context)
            .finish()
    }
}
