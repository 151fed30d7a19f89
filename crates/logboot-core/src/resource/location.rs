//! Configuration location parsing

use std::path::PathBuf;

use url::Url;

use super::error::{LoadError, LoadResult};

/// Scheme naming a resource in the active loading context
pub const CLASSPATH_SCHEME: &str = "classpath";

/// Synonym of [`CLASSPATH_SCHEME`]
pub const CLASSLOADER_SCHEME: &str = "classloader";

/// A parsed configuration location
///
/// - `log4j2.xml`, `/etc/app/log4j2.xml` → [`Location::Path`]
/// - `classpath:log4j2.xml`, `classloader:log4j2.xml` → [`Location::Resource`]
/// - `file:///etc/app/log4j2.xml`, `https://…` → [`Location::Url`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// No scheme; names a file or a loading-context resource
    Path(PathBuf),
    /// Resource relative to the loading context
    Resource(String),
    /// Absolute URL
    Url(Url),
}

impl Location {
    pub fn parse(raw: &str) -> LoadResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(LoadError::invalid_location(raw, "empty location"));
        }

        for scheme in [CLASSPATH_SCHEME, CLASSLOADER_SCHEME] {
            if let Some(rest) = strip_scheme(raw, scheme) {
                return Ok(Location::Resource(rest.trim_start_matches('/').to_string()));
            }
        }

        match Url::parse(raw) {
            // Single-letter schemes are Windows drive letters
            Ok(url) if url.scheme().len() > 1 => Ok(Location::Url(url)),
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Location::Path(PathBuf::from(raw)))
            }
            Err(e) => Err(LoadError::invalid_location(raw, e.to_string())),
        }
    }

    /// Filesystem path for bare paths and `file:` URLs
    pub fn file_path(&self) -> Option<PathBuf> {
        match self {
            Location::Path(path) => Some(path.clone()),
            Location::Url(url) if url.scheme() == "file" => url.to_file_path().ok(),
            _ => None,
        }
    }

    /// Resource name to look up in the loading context, if any
    pub fn resource_path(&self) -> Option<&str> {
        match self {
            Location::Path(path) => path.to_str(),
            Location::Resource(name) => Some(name),
            Location::Url(_) => None,
        }
    }

    /// Whether the location carries a scheme
    pub fn is_absolute(&self) -> bool {
        !matches!(self, Location::Path(_))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Resource(name) => write!(f, "{}:{}", CLASSPATH_SCHEME, name),
            Location::Url(url) => write!(f, "{}", url),
        }
    }
}

fn strip_scheme<'a>(raw: &'a str, scheme: &str) -> Option<&'a str> {
    let (head, rest) = raw.split_once(':')?;
    head.eq_ignore_ascii_case(scheme).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_paths() {
        assert_eq!(
            Location::parse("log4j2.xml").unwrap(),
            Location::Path(PathBuf::from("log4j2.xml"))
        );
        assert_eq!(
            Location::parse(" /etc/app/log4j2.xml ").unwrap(),
            Location::Path(PathBuf::from("/etc/app/log4j2.xml"))
        );
        assert_eq!(
            Location::parse("C:\\logs\\log4j2.xml").unwrap(),
            Location::Path(PathBuf::from("C:\\logs\\log4j2.xml"))
        );
    }

    #[test]
    fn test_loading_context_schemes() {
        assert_eq!(
            Location::parse("classpath:log4j2.xml").unwrap(),
            Location::Resource("log4j2.xml".to_string())
        );
        assert_eq!(
            Location::parse("classloader:/config/log4j2.xml").unwrap(),
            Location::Resource("config/log4j2.xml".to_string())
        );
        assert_eq!(
            Location::parse("CLASSPATH:log4j2.json").unwrap(),
            Location::Resource("log4j2.json".to_string())
        );
    }

    #[test]
    fn test_urls() {
        let location = Location::parse("https://config.example.com/log4j2.xml").unwrap();
        assert!(location.is_absolute());
        assert!(location.file_path().is_none());
        assert!(location.resource_path().is_none());

        let file = Location::parse("file:///etc/app/log4j2.xml").unwrap();
        assert_eq!(file.file_path(), Some(PathBuf::from("/etc/app/log4j2.xml")));
    }

    #[test]
    fn test_path_is_both_file_and_resource() {
        let location = Location::parse("config/log4j2.xml").unwrap();
        assert!(!location.is_absolute());
        assert_eq!(location.file_path(), Some(PathBuf::from("config/log4j2.xml")));
        assert_eq!(location.resource_path(), Some("config/log4j2.xml"));
    }

    #[test]
    fn test_invalid_locations() {
        assert!(matches!(
            Location::parse("   "),
            Err(LoadError::InvalidLocation { .. })
        ));
        assert!(matches!(
            Location::parse("http://[::1"),
            Err(LoadError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Location::parse("classloader:log4j2.xml").unwrap().to_string(),
            "classpath:log4j2.xml"
        );
    }
}
