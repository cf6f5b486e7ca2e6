use crate::page::PageId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of visiting one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub page: PageId,
    pub url: String,
    pub links_found: Vec<PageId>,
    pub response_time: Duration,
    pub error: Option<String>,
}

impl CrawlResult {
    pub fn new(page: PageId, url: String) -> Self {
        Self {
            page,
            url,
            links_found: Vec::new(),
            response_time: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn with_error(page: PageId, url: String, error: String) -> Self {
        Self {
            page,
            url,
            links_found: Vec::new(),
            response_time: Duration::from_secs(0),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything one crawl invocation produced, in visit order.
///
/// There is exactly one result per visited page, so the results double as
/// the crawl's adjacency: page -> ordered list of accepted link targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    pub results: Vec<CrawlResult>,
}

impl CrawlReport {
    pub fn visited(&self) -> impl Iterator<Item = &PageId> {
        self.results.iter().map(|r| &r.page)
    }

    pub fn visited_count(&self) -> usize {
        self.results.len()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_success()).count()
    }

    pub fn total_links(&self) -> usize {
        self.results.iter().map(|r| r.links_found.len()).sum()
    }

    /// Page -> outgoing links, for every visited page (including failures).
    pub fn adjacency(&self) -> impl Iterator<Item = (&PageId, &[PageId])> {
        self.results
            .iter()
            .map(|r| (&r.page, r.links_found.as_slice()))
    }

    pub fn links_for(&self, page: &PageId) -> Option<&[PageId]> {
        self.results
            .iter()
            .find(|r| &r.page == page)
            .map(|r| r.links_found.as_slice())
    }
}
