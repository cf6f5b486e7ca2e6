use crate::error::PipelineError;
use crate::graph::LinkGraph;
use crate::rank::{PageRanker, RankConfig, Ranking};
use crate::report::RankReport;
use indicatif::{ProgressBar, ProgressStyle};
use linkrank_scanner::{
    CrawlConfig, CrawlReport, Crawler, HttpFetcher, LinkExtractor, PageFetcher, PageId,
};
use std::sync::Arc;
use tracing::info;

/// Options for a crawl-and-rank run
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub crawl: CrawlConfig,
    pub rank: RankConfig,
    pub show_progress_bars: bool,
}

/// Callback for reporting pipeline stage messages
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub crawl: CrawlReport,
    pub graph: LinkGraph,
    pub ranking: Ranking,
    pub report: RankReport,
}

fn progress_spinner(show: bool) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Starting crawl...");
    Some(pb)
}

fn http_crawler(
    config: &CrawlConfig,
    progress_bar: Option<&ProgressBar>,
) -> Result<Crawler<HttpFetcher>, PipelineError> {
    let fetcher = HttpFetcher::with_timeout(config.timeout_secs)?;
    let mut crawler = Crawler::new(fetcher, config);

    if let Some(pb) = progress_bar {
        let pb = pb.clone();
        let budget = config.max_pages;
        crawler = crawler.with_progress_callback(Arc::new(move |count: usize, page: &PageId| {
            pb.set_message(format!("Crawling [{}/{}] {}", count, budget, page));
            pb.tick();
        }));
    }

    Ok(crawler)
}

/// Crawl only, over HTTP. Returns the per-page results and the graph built
/// from them.
pub async fn execute_crawl(
    options: &CrawlOptions,
) -> Result<(CrawlReport, LinkGraph), PipelineError> {
    let progress_bar = progress_spinner(options.show_progress_bars);
    let crawler = http_crawler(&options.crawl, progress_bar.as_ref())?;

    let report = crawler.crawl(&options.crawl.seed).await;
    let graph = LinkGraph::from_crawl(&report);

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Crawl complete! {} pages visited",
            report.visited_count()
        ));
    }

    Ok((report, graph))
}

/// Crawl over HTTP, build the graph and rank it.
pub async fn execute_rank(
    options: &CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<PipelineOutput, PipelineError> {
    let progress_bar = progress_spinner(options.show_progress_bars);
    let crawler = http_crawler(&options.crawl, progress_bar.as_ref())?;

    let output = run_pipeline(&crawler, options, progress_callback).await;

    if let Some(ref pb) = progress_bar {
        match output {
            Ok(ref output) => pb.finish_with_message(format!(
                "Crawl complete! {} pages visited, {} ranked",
                output.crawl.visited_count(),
                output.graph.node_count()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    output
}

/// The crawl -> graph -> rank pipeline with an injected crawler.
pub async fn run_pipeline<F, E>(
    crawler: &Crawler<F, E>,
    options: &CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<PipelineOutput, PipelineError>
where
    F: PageFetcher,
    E: LinkExtractor,
{
    let crawl = crawler.crawl(&options.crawl.seed).await;

    let graph = LinkGraph::from_crawl(&crawl);
    info!(
        "Built link graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Ranking {} pages linked by {} edges",
            graph.node_count(),
            graph.edge_count()
        ));
    }

    let ranking = PageRanker::new(options.rank).rank(&graph)?;
    let report = RankReport::build(
        &crawl,
        &graph,
        &ranking,
        options.rank.top_k,
        crawler.origin(),
        &options.crawl.seed,
        crawler.path_prefix(),
    )?;

    Ok(PipelineOutput {
        crawl,
        graph,
        ranking,
        report,
    })
}

/// Generate a plain adjacency listing from crawl results
pub fn generate_crawl_report(report: &CrawlReport, graph: &LinkGraph) -> String {
    let mut out = String::new();
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    out.push_str("# Summary:\n");
    out.push_str(&format!("  Pages crawled: {}\n", report.visited_count()));
    out.push_str(&format!("  Failed fetches: {}\n", report.failed_count()));
    out.push_str(&format!("  Links accepted: {}\n", report.total_links()));
    out.push_str(&format!(
        "  Graph: {} nodes, {} edges ({} dangling)\n",
        graph.node_count(),
        graph.edge_count(),
        graph.dangling().len()
    ));
    out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for result in &report.results {
        match result.error {
            Some(ref error) => out.push_str(&format!(
                "{} \x1b[31m✗ {}\x1b[0m\n",
                result.page, error
            )),
            None => out.push_str(&format!(
                "{} \x1b[32m({} links, {} ms)\x1b[0m\n",
                result.page,
                result.links_found.len(),
                result.response_time.as_millis()
            )),
        }
        for link in &result.links_found {
            out.push_str(&format!("  -> {}\n", link));
        }
    }

    out
}
