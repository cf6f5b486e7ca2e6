use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Identifier of a crawlable page: its path under the crawl origin,
/// e.g. `/wiki/Data_science`.
///
/// Equality is exact string equality. No case folding or trailing slash
/// handling is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable title: the path prefix is stripped and underscores
    /// become spaces.
    pub fn label(&self, prefix: &str) -> String {
        self.0
            .strip_prefix(prefix)
            .unwrap_or(&self.0)
            .replace('_', " ")
    }

    /// Fully qualified URL of this page under `origin`.
    pub fn to_url(&self, origin: &Url) -> Result<Url> {
        origin
            .join(&self.0)
            .map_err(|e| ScanError::InvalidUrl(format!("{}{}: {}", origin, self.0, e)))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for PageId {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
