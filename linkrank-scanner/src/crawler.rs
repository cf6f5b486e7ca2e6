use crate::config::CrawlConfig;
use crate::extract::{AnchorExtractor, LinkExtractor, LinkFilter};
use crate::fetch::PageFetcher;
use crate::frontier::Frontier;
use crate::page::PageId;
use crate::result::{CrawlReport, CrawlResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Called with (pages visited so far, page about to be fetched).
pub type ProgressCallback = Arc<dyn Fn(usize, &PageId) + Send + Sync>;

/// Sequential breadth-first crawler bounded by a page budget.
///
/// Pages are fetched one at a time in frontier order. Each call to
/// [`Crawler::crawl`] owns a fresh [`Frontier`], so nothing carries over
/// between crawls.
pub struct Crawler<F, E = AnchorExtractor> {
    fetcher: F,
    extractor: E,
    origin: Url,
    filter: LinkFilter,
    max_pages: usize,
    progress_callback: Option<ProgressCallback>,
}

impl<F: PageFetcher> Crawler<F, AnchorExtractor> {
    pub fn new(fetcher: F, config: &CrawlConfig) -> Self {
        Self {
            fetcher,
            extractor: AnchorExtractor::new(),
            origin: config.origin.clone(),
            filter: LinkFilter::new(
                config.origin.clone(),
                config.path_prefix.clone(),
                config.max_links,
            ),
            max_pages: config.max_pages,
            progress_callback: None,
        }
    }
}

impl<F: PageFetcher, E: LinkExtractor> Crawler<F, E> {
    pub fn with_extractor<X: LinkExtractor>(self, extractor: X) -> Crawler<F, X> {
        Crawler {
            fetcher: self.fetcher,
            extractor,
            origin: self.origin,
            filter: self.filter,
            max_pages: self.max_pages,
            progress_callback: self.progress_callback,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn path_prefix(&self) -> &str {
        self.filter.path_prefix()
    }

    /// Crawl from `seed` until the frontier runs dry or `max_pages` pages
    /// have been visited.
    pub async fn crawl(&self, seed: &PageId) -> CrawlReport {
        info!(
            "Starting crawl of {} with a budget of {} pages",
            seed, self.max_pages
        );

        let mut frontier = Frontier::with_seed(seed.clone());
        let mut report = CrawlReport::default();

        while !frontier.is_empty() && frontier.visited_count() < self.max_pages {
            let Ok(page) = frontier.dequeue() else {
                break;
            };
            if !frontier.mark_visited(page.clone()) {
                debug!("Skipping already visited {}", page);
                continue;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(frontier.visited_count(), &page);
            }

            let result = self.visit(&page).await;
            let mut queued = 0;
            for link in &result.links_found {
                if frontier.enqueue(link.clone()) {
                    queued += 1;
                }
            }
            debug!(
                "{}: {} links accepted, {} newly queued",
                page,
                result.links_found.len(),
                queued
            );

            report.results.push(result);
        }

        info!(
            "Crawl complete. Visited {} pages, {} left in frontier",
            report.visited_count(),
            frontier.len()
        );
        report
    }

    /// Fetch one page and pick its links. Failures stay local to the page.
    async fn visit(&self, page: &PageId) -> CrawlResult {
        let url = match page.to_url(&self.origin) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot build URL for {}: {}", page, e);
                return CrawlResult::with_error(page.clone(), page.to_string(), e.to_string());
            }
        };

        let start = Instant::now();
        match self.fetcher.fetch(&url).await {
            Ok(body) => {
                let mut result = CrawlResult::new(page.clone(), url.to_string());
                result.response_time = start.elapsed();
                result.links_found = self.filter.select(self.extractor.extract(&body));
                result
            }
            Err(e) => {
                warn!("Crawl error for {}: {}", url, e);
                let mut result =
                    CrawlResult::with_error(page.clone(), url.to_string(), e.to_string());
                result.response_time = start.elapsed();
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ScanError};
    use crate::fetch::HttpFetcher;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Serves canned documents keyed by path; anything else is a 404.
    struct StubFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &[&str])]) -> Self {
            let pages = pages
                .iter()
                .map(|(page, links)| {
                    let mut html = String::from("<html><body>");
                    for link in *links {
                        html.push_str(&format!(r#"<a href="{}">{}</a>"#, link, link));
                    }
                    html.push_str("</body></html>");
                    (page.to_string(), html)
                })
                .collect();
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl PageFetcher for &StubFetcher {
        async fn fetch(&self, url: &Url) -> Result<String> {
            self.requests.lock().unwrap().push(url.path().to_string());
            self.pages
                .get(url.path())
                .cloned()
                .ok_or_else(|| ScanError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn config(max_pages: usize, max_links: usize) -> CrawlConfig {
        CrawlConfig::new("https://en.wikipedia.org", "/wiki/A")
            .unwrap()
            .with_max_pages(max_pages)
            .with_max_links(max_links)
    }

    fn paths(pages: &[PageId]) -> Vec<&str> {
        pages.iter().map(PageId::as_str).collect()
    }

    #[tokio::test]
    async fn test_page_budget_stops_crawl() {
        let fetcher = StubFetcher::new(&[
            ("/wiki/A", &["/wiki/B", "/wiki/C"]),
            ("/wiki/B", &["/wiki/A"]),
            ("/wiki/C", &["/wiki/A", "/wiki/D"]),
            ("/wiki/D", &[]),
        ]);
        let crawler = Crawler::new(&fetcher, &config(3, 2));

        let report = crawler.crawl(&PageId::from("/wiki/A")).await;

        let visited: Vec<&str> = report.visited().map(PageId::as_str).collect();
        assert_eq!(visited, vec!["/wiki/A", "/wiki/B", "/wiki/C"]);
        assert_eq!(
            paths(report.links_for(&PageId::from("/wiki/C")).unwrap()),
            vec!["/wiki/A", "/wiki/D"]
        );
        assert!(!fetcher.requests().contains(&"/wiki/D".to_string()));
    }

    #[tokio::test]
    async fn test_frontier_exhaustion_ends_crawl_early() {
        let fetcher = StubFetcher::new(&[("/wiki/A", &["/wiki/B"]), ("/wiki/B", &[])]);
        let crawler = Crawler::new(&fetcher, &config(10, 20));

        let report = crawler.crawl(&PageId::from("/wiki/A")).await;

        assert_eq!(report.visited_count(), 2);
        assert_eq!(fetcher.requests(), vec!["/wiki/A", "/wiki/B"]);
    }

    #[tokio::test]
    async fn test_crawl_is_breadth_first() {
        let fetcher = StubFetcher::new(&[
            ("/wiki/A", &["/wiki/B", "/wiki/C"]),
            ("/wiki/B", &["/wiki/D"]),
            ("/wiki/C", &["/wiki/E"]),
            ("/wiki/D", &[]),
            ("/wiki/E", &[]),
        ]);
        let crawler = Crawler::new(&fetcher, &config(10, 20));

        crawler.crawl(&PageId::from("/wiki/A")).await;

        assert_eq!(
            fetcher.requests(),
            vec!["/wiki/A", "/wiki/B", "/wiki/C", "/wiki/D", "/wiki/E"]
        );
    }

    #[tokio::test]
    async fn test_each_page_fetched_once() {
        let fetcher = StubFetcher::new(&[
            ("/wiki/A", &["/wiki/B", "/wiki/C"]),
            ("/wiki/B", &["/wiki/C", "/wiki/A"]),
            ("/wiki/C", &["/wiki/B", "/wiki/A"]),
        ]);
        let crawler = Crawler::new(&fetcher, &config(10, 20));

        let report = crawler.crawl(&PageId::from("/wiki/A")).await;

        assert_eq!(report.visited_count(), 3);
        assert_eq!(fetcher.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_local() {
        let fetcher = StubFetcher::new(&[
            ("/wiki/A", &["/wiki/Broken", "/wiki/C"]),
            ("/wiki/C", &[]),
        ]);
        let crawler = Crawler::new(&fetcher, &config(5, 20));

        let report = crawler.crawl(&PageId::from("/wiki/A")).await;

        assert_eq!(report.visited_count(), 3);
        assert_eq!(report.failed_count(), 1);
        let broken = &report.results[1];
        assert_eq!(broken.page.as_str(), "/wiki/Broken");
        assert!(broken.links_found.is_empty());
        assert!(broken.error.as_deref().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_zero_budget_visits_nothing() {
        let fetcher = StubFetcher::new(&[("/wiki/A", &["/wiki/B"])]);
        let crawler = Crawler::new(&fetcher, &config(0, 20));

        let report = crawler.crawl(&PageId::from("/wiki/A")).await;

        assert_eq!(report.visited_count(), 0);
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_custom_extractor() {
        let fetcher = StubFetcher::new(&[("/wiki/A", &[]), ("/wiki/Z", &[])]);
        let crawler = Crawler::new(&fetcher, &config(5, 20))
            .with_extractor(|_doc: &str| vec!["/wiki/Z".to_string()]);

        let report = crawler.crawl(&PageId::from("/wiki/A")).await;

        assert_eq!(paths(&report.results[0].links_found), vec!["/wiki/Z"]);
        // /wiki/Z links to itself through the stub extractor; it is not re-queued.
        assert_eq!(report.visited_count(), 2);
    }

    #[tokio::test]
    async fn test_progress_callback_counts_visits() {
        let seen: Arc<Mutex<Vec<(usize, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let fetcher = StubFetcher::new(&[("/wiki/A", &["/wiki/B"]), ("/wiki/B", &[])]);
        let crawler = Crawler::new(&fetcher, &config(5, 20)).with_progress_callback(Arc::new(
            move |count: usize, page: &PageId| {
                seen_clone.lock().unwrap().push((count, page.to_string()));
            },
        ));

        crawler.crawl(&PageId::from("/wiki/A")).await;

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(1, "/wiki/A".to_string()), (2, "/wiki/B".to_string())]
        );
    }

    /// End-to-end over HTTP with a mock server standing in for the origin
    #[tokio::test]
    async fn test_http_crawl() {
        let mock_server = MockServer::start().await;

        let root_html = format!(
            r#"<html><body>
                <a href="/wiki/Page_1">Page 1</a>
                <a href="{}/wiki/Page_2">Page 2</a>
                <a href="/wiki/Special:Search">Search</a>
                <a href="https://example.org/wiki/Elsewhere">External</a>
            </body></html>"#,
            mock_server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/wiki/Root"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(root_html.as_bytes()),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/wiki/Page_1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(b"<html><body><a href=\"/wiki/Root\">back</a></body></html>"),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/wiki/Page_2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let config = CrawlConfig::new(&mock_server.uri(), "/wiki/Root").unwrap();
        let crawler = Crawler::new(HttpFetcher::new().unwrap(), &config);

        let report = crawler.crawl(&config.seed).await;

        assert_eq!(report.visited_count(), 3);
        assert_eq!(
            paths(&report.results[0].links_found),
            vec!["/wiki/Page_1", "/wiki/Page_2"]
        );
        assert_eq!(paths(&report.results[1].links_found), vec!["/wiki/Root"]);
        assert!(report.results[2].error.is_some());
    }
}
