use crate::error::{Result, ScanError};
use crate::page::PageId;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://en.wikipedia.org";
pub const DEFAULT_SEED: &str = "/wiki/Data_science";
pub const DEFAULT_PATH_PREFIX: &str = "/wiki/";
pub const DEFAULT_MAX_PAGES: usize = 5;
pub const DEFAULT_MAX_LINKS: usize = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for one bounded crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Scheme and host every page id is resolved against.
    pub origin: Url,
    pub seed: PageId,
    /// Only links whose path starts with this prefix are followed.
    pub path_prefix: String,
    /// Page budget: the crawl stops once this many pages are visited.
    pub max_pages: usize,
    /// Cap on accepted links per page.
    pub max_links: usize,
    pub timeout_secs: u64,
}

impl CrawlConfig {
    pub fn new(origin: &str, seed: &str) -> Result<Self> {
        let origin = Url::parse(origin)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", origin, e)))?;
        if origin.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!("{} has no host", origin)));
        }

        Ok(Self {
            origin,
            seed: PageId::from(seed),
            ..Self::default()
        })
    }

    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_links(mut self, max_links: usize) -> Self {
        self.max_links = max_links;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn seed_url(&self) -> Result<Url> {
        self.seed.to_url(&self.origin)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            origin: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"),
            seed: PageId::from(DEFAULT_SEED),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            max_links: DEFAULT_MAX_LINKS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
