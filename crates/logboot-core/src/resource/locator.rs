//! Opening configuration locations through a loading context

use std::path::Path;

use url::Url;

use super::context::LoadingContext;
use super::location::Location;
use super::source::ConfigurationSource;
use crate::status::StatusLogger;
use crate::{status_debug, status_error};

/// Opens locations the way the resolver needs them opened
///
/// Failures are reported to the status logger and surface as `None`.
pub struct Locator<'a> {
    context: &'a LoadingContext,
    status: &'a dyn StatusLogger,
}

impl<'a> Locator<'a> {
    pub fn new(context: &'a LoadingContext, status: &'a dyn StatusLogger) -> Self {
        Self { context, status }
    }

    pub fn context(&self) -> &'a LoadingContext {
        self.context
    }

    pub fn status(&self) -> &'a dyn StatusLogger {
        self.status
    }

    /// Open a location: existing file, then loading-context resource, then URL
    pub fn open(&self, location: &Location) -> Option<ConfigurationSource> {
        self.open_in_order(location, false)
    }

    /// Like [`open`](Self::open), but a resource in the loading context wins
    /// over a file of the same name
    pub fn open_preferring_context(&self, location: &Location) -> Option<ConfigurationSource> {
        self.open_in_order(location, true)
    }

    /// Open a raw location string from the environment
    ///
    /// Parsed locations are tried first. When that yields nothing the string
    /// is retried as a URL, then as a resource, then as a plain file path.
    pub fn open_str(&self, raw: &str) -> Option<ConfigurationSource> {
        match Location::parse(raw) {
            Ok(location) => {
                if let Some(source) = self.open(&location) {
                    return Some(source);
                }
            }
            Err(e) => status_debug!(self.status, "{}", e),
        }

        let loader = self.context.loader();
        if let Ok(url) = Url::parse(raw) {
            if url.scheme().len() > 1 {
                match loader.open_url(&url) {
                    Ok(source) => return Some(source),
                    Err(e) => status_debug!(self.status, "Unable to open {} as a URL: {}", raw, e),
                }
            }
        }
        if let Some(source) = self.open_resource(raw) {
            return Some(source);
        }
        match loader.open_file(Path::new(raw)) {
            Ok(source) => source,
            Err(e) => {
                status_debug!(self.status, "Unable to open {} as a file: {}", raw, e);
                None
            }
        }
    }

    /// Load a resource from the loading context
    pub fn open_resource(&self, name: &str) -> Option<ConfigurationSource> {
        match self.context.loader().load_resource(name) {
            Ok(source) => source,
            Err(e) => {
                status_debug!(self.status, "Unable to load resource {}: {}", name, e);
                None
            }
        }
    }

    fn open_in_order(&self, location: &Location, context_first: bool) -> Option<ConfigurationSource> {
        let resource = location.resource_path();
        if context_first {
            if let Some(source) = resource.and_then(|name| self.open_resource(name)) {
                return Some(source);
            }
        }

        if let Some(path) = location.file_path() {
            match self.context.loader().open_file(&path) {
                Ok(Some(source)) => return Some(source),
                Ok(None) => {}
                Err(e) => status_error!(self.status, "Cannot open file {}: {}", path.display(), e),
            }
        }

        if !context_first {
            if let Some(source) = resource.and_then(|name| self.open_resource(name)) {
                return Some(source);
            }
        }

        match location {
            Location::Url(url) if url.scheme() != "file" => {
                match self.context.loader().open_url(url) {
                    Ok(source) => Some(source),
                    Err(e) => {
                        status_error!(self.status, "Unable to access {}: {}", url, e);
                        None
                    }
                }
            }
            other => {
                status_error!(
                    self.status,
                    "File not found in file system or loading context: {}",
                    other
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for Locator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
