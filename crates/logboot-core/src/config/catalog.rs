//! Ranked, lazily discovered list of configuration factories

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use super::factory::{
    FactoryDescriptor, SharedConfigurationFactory, CATEGORY, CONFIGURATION_FACTORY_PROPERTY,
};
use crate::plugins::{PluginCandidate, SharedPluginRegistry};
use crate::properties::SharedPropertySource;
use crate::status::SharedStatusLogger;
use crate::{status_debug, status_error};

/// The factories the resolver dispatches to, in the order it tries them
///
/// The list is built on first use and then frozen until [`reset`](Self::reset):
/// 1. the factory named by `log4j.configurationFactory`, if any
/// 2. every candidate in the `ConfigurationFactory` category, by ascending
///    rank, ties kept in discovery order
///
/// Candidates whose constructor fails are reported and left out.
pub struct FactoryCatalog {
    plugins: SharedPluginRegistry<SharedConfigurationFactory>,
    properties: SharedPropertySource,
    status: SharedStatusLogger,
    lock: Mutex<()>,
    initialized: AtomicBool,
    factories: ArcSwap<Vec<FactoryDescriptor>>,
}

impl FactoryCatalog {
    pub fn new(
        plugins: SharedPluginRegistry<SharedConfigurationFactory>,
        properties: SharedPropertySource,
        status: SharedStatusLogger,
    ) -> Self {
        Self {
            plugins,
            properties,
            status,
            lock: Mutex::new(()),
            initialized: AtomicBool::new(false),
            factories: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// The frozen factory list, discovering it on first call
    pub fn factories(&self) -> Arc<Vec<FactoryDescriptor>> {
        if !self.initialized.load(Ordering::Acquire) {
            let _guard = self.lock.lock();
            if !self.initialized.load(Ordering::Acquire) {
                self.factories.store(Arc::new(self.discover()));
                self.initialized.store(true, Ordering::Release);
            }
        }
        self.factories.load_full()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Forget the frozen list; the next call rediscovers
    pub fn reset(&self) {
        let _guard = self.lock.lock();
        self.factories.store(Arc::new(Vec::new()));
        self.initialized.store(false, Ordering::Release);
    }

    fn discover(&self) -> Vec<FactoryDescriptor> {
        let mut list = Vec::new();

        if let Some(name) = self.properties.get_property(CONFIGURATION_FACTORY_PROPERTY) {
            match self.plugins.lookup(CATEGORY, &name) {
                Ok(candidate) => self.add(&mut list, &candidate),
                Err(e) => status_error!(self.status, "Unable to load factory {}: {}", name, e),
            }
        }

        let mut ordered = self.plugins.candidates(CATEGORY);
        ordered.sort_by_key(|candidate| candidate.rank);
        for candidate in &ordered {
            self.add(&mut list, candidate);
        }

        status_debug!(
            self.status,
            "Configuration factories: [{}]",
            list.iter().map(|d| d.name()).collect::<Vec<_>>().join(", ")
        );
        list
    }

    fn add(
        &self,
        list: &mut Vec<FactoryDescriptor>,
        candidate: &PluginCandidate<SharedConfigurationFactory>,
    ) {
        match candidate.instantiate() {
            Ok(factory) => list.push(FactoryDescriptor::new(&candidate.name, candidate.rank, factory)),
            Err(e) => status_error!(
                self.status,
                "Unable to create instance of {}: {}",
                candidate.name,
                e
            ),
        }
    }
}

impl std::fmt::Debug for FactoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryCatalog")
            .field("initialized", &self.is_initialized())
            .field("factories", &self.factories.load())
            .finish_non_exhaustive()
    }
}
