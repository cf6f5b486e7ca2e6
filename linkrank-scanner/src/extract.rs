use crate::page::PageId;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::{Position, Url};

/// Turns a fetched document into candidate link targets, in document order.
pub trait LinkExtractor {
    fn extract(&self, document: &str) -> Vec<String>;
}

/// Extracts the `href` of every `<a href>` element.
pub struct AnchorExtractor {
    selector: Selector,
}

impl AnchorExtractor {
    pub fn new() -> Self {
        Self {
            selector: Selector::parse("a[href]").expect("static selector is valid"),
        }
    }
}

impl Default for AnchorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for AnchorExtractor {
    fn extract(&self, document: &str) -> Vec<String> {
        let html = Html::parse_document(document);
        html.select(&self.selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

impl<F> LinkExtractor for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn extract(&self, document: &str) -> Vec<String> {
        self(document)
    }
}

/// Accepts the first `max_links` distinct internal links of a page.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    origin: Url,
    path_prefix: String,
    max_links: usize,
}

impl LinkFilter {
    pub fn new(origin: Url, path_prefix: impl Into<String>, max_links: usize) -> Self {
        Self {
            origin,
            path_prefix: path_prefix.into(),
            max_links,
        }
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Keep candidates in order, dropping non-internal ones and repeats,
    /// until `max_links` have been accepted.
    pub fn select<I, S>(&self, candidates: I) -> Vec<PageId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut accepted = Vec::new();

        for candidate in candidates {
            if accepted.len() >= self.max_links {
                break;
            }
            let Some(page) = self.normalize(candidate.as_ref()) else {
                continue;
            };
            if seen.insert(page.clone()) {
                accepted.push(page);
            }
        }

        accepted
    }

    /// Map one href to an internal page id, or `None` if it should not be
    /// followed.
    pub fn normalize(&self, href: &str) -> Option<PageId> {
        let href = href.trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            return None;
        }

        let path = self.same_origin_path(href)?;
        if !self.is_internal(&path) {
            debug!("  -> Skipping {}", href);
            return None;
        }

        Some(PageId::new(path))
    }

    /// Resolve root-relative, protocol-relative and absolute hrefs the same
    /// way, so one page always yields one percent-encoded path.
    fn same_origin_path(&self, href: &str) -> Option<String> {
        let mut url = if href.starts_with('/') {
            self.origin.join(href).ok()?
        } else {
            Url::parse(href).ok()?
        };
        if url.origin() != self.origin.origin() {
            return None;
        }
        url.set_fragment(None);
        Some(url[Position::BeforePath..].to_string())
    }

    fn is_internal(&self, path: &str) -> bool {
        match path.strip_prefix(self.path_prefix.as_str()) {
            // Namespaced pages (File:, Special:, Talk:, ...) are not articles.
            Some(rest) => !rest.is_empty() && !path.contains(':'),
            None => false,
        }
    }
}
