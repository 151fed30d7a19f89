//! Environment variable property source

use std::env;

use super::traits::{normalize_value, PropertySource};

/// Property source that reads environment variables
///
/// A key is tried as-is first, then in its conventional environment form:
/// dots and dashes become underscores, camel-case humps are split, and the
/// result is upper-cased.
///
/// - `log4j.configurationFile` → `LOG4J_CONFIGURATION_FILE`
/// - `log4j.configurationFactory` → `LOG4J_CONFIGURATION_FACTORY`
///
/// # Example
///
/// ```
/// use logboot_core::properties::{EnvPropertySource, PropertySource};
///
/// let source = EnvPropertySource::new();
/// // Checks `log4j.configurationFile`, then `LOG4J_CONFIGURATION_FILE`
/// let _location = source.get_property("log4j.configurationFile");
/// ```
#[derive(Debug, Default)]
pub struct EnvPropertySource {
    _private: (),
}

impl EnvPropertySource {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Conventional environment variable name for a property key
    pub fn env_key(key: &str) -> String {
        let mut out = String::with_capacity(key.len() + 4);
        let mut prev_lower = false;
        for c in key.chars() {
            match c {
                '.' | '-' | ' ' => {
                    out.push('_');
                    prev_lower = false;
                }
                c if c.is_ascii_uppercase() => {
                    if prev_lower {
                        out.push('_');
                    }
                    out.push(c);
                    prev_lower = false;
                }
                c => {
                    out.push(c.to_ascii_uppercase());
                    prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
                }
            }
        }
        out
    }

    fn read(name: &str) -> Option<String> {
        env::var(name).ok().and_then(|v| normalize_value(&v))
    }
}

impl PropertySource for EnvPropertySource {
    fn name(&self) -> &str {
        "env"
    }

    fn get_property(&self, key: &str) -> Option<String> {
        if let Some(value) = Self::read(key) {
            return Some(value);
        }

        let env_key = Self::env_key(key);
        if env_key != key {
            return Self::read(&env_key);
        }
        None
    }
}
