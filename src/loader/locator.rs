use std::fmt;
use std::path::{Path, PathBuf};

/// Where a locator points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorKind<'a> {
    /// `http://` or `https://` URL.
    Http(&'a str),
    /// Local file (plain path or `file://` URL).
    File(PathBuf),
}

/// Immutable string identifying the model to load.
///
/// A session is bound to exactly one locator; viewing a different model
/// means starting a new session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelLocator(String);

impl ModelLocator {
    /// Wrap a locator string (leading/trailing whitespace is dropped).
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw: String = raw.into();
        Self(raw.trim().to_owned())
    }

    /// The locator as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the locator.
    #[must_use]
    pub fn kind(&self) -> LocatorKind<'_> {
        let lower = self.0.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            LocatorKind::Http(&self.0)
        } else if lower.starts_with("file://") {
            LocatorKind::File(PathBuf::from(&self.0["file://".len()..]))
        } else {
            LocatorKind::File(PathBuf::from(&self.0))
        }
    }

    /// The locator with any query string and fragment removed.
    #[must_use]
    pub fn path_part(&self) -> &str {
        let end = self.0.find(['?', '#']).unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// Lower-cased file extension of the path part, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let last_segment = self.path_part().rsplit('/').next()?;
        Path::new(last_segment)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Last path segment, used to name the loaded asset.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path_part()
            .rsplit(['/', '\\'])
            .find(|s| !s.is_empty())
            .unwrap_or("model")
    }
}

impl fmt::Display for ModelLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelLocator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ModelLocator {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
