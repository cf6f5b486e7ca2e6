// Report generation for ranked pages

use crate::graph::LinkGraph;
use crate::rank::{RankStatus, Ranking};
use linkrank_scanner::{CrawlReport, PageId, ScanError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use url::Url;

const HEAVY_RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// One entry of the top-K list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPage {
    pub rank: usize,
    pub page: PageId,
    pub label: String,
    pub url: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    pub seed_url: String,
    pub pages_crawled: usize,
    pub failed_pages: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub iterations: usize,
    pub status: RankStatus,
    pub top: Vec<RankedPage>,
}

impl RankReport {
    pub fn build(
        crawl: &CrawlReport,
        graph: &LinkGraph,
        ranking: &Ranking,
        top_k: usize,
        origin: &Url,
        seed: &PageId,
        path_prefix: &str,
    ) -> Result<Self, ScanError> {
        let top = ranking
            .top(top_k)
            .into_iter()
            .enumerate()
            .map(|(idx, (page, score))| -> Result<RankedPage, ScanError> {
                Ok(RankedPage {
                    rank: idx + 1,
                    label: page.label(path_prefix),
                    url: page.to_url(origin)?.to_string(),
                    page,
                    score,
                })
            })
            .collect::<Result<Vec<_>, ScanError>>()?;

        Ok(Self {
            seed_url: seed.to_url(origin)?.to_string(),
            pages_crawled: crawl.visited_count(),
            failed_pages: crawl.failed_count(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            iterations: ranking.iterations(),
            status: ranking.status(),
            top,
        })
    }

    pub fn top_pages(&self) -> Vec<PageId> {
        self.top.iter().map(|entry| entry.page.clone()).collect()
    }
}

/// `label: score (url)`, the line format used for every ranked page.
pub fn format_ranked_line(entry: &RankedPage) -> String {
    format!("{}: {:.5} ({})", entry.label, entry.score, entry.url)
}

pub fn generate_text_report(data: &RankReport) -> String {
    let mut report = String::new();

    report.push_str(HEAVY_RULE);
    report.push_str("                            LINKRANK REPORT\n");
    report.push_str(HEAVY_RULE);
    report.push('\n');

    report.push_str(&format!("Seed:          {}\n", data.seed_url));
    report.push_str(&format!(
        "Pages crawled: {} ({} failed)\n",
        data.pages_crawled, data.failed_pages
    ));
    report.push_str(&format!(
        "Graph:         {} nodes, {} edges\n",
        data.node_count, data.edge_count
    ));
    let status = match data.status {
        RankStatus::Converged => format!("converged after {} iterations", data.iterations),
        RankStatus::CapReached => format!("stopped at iteration cap ({})", data.iterations),
    };
    report.push_str(&format!("Ranking:       {}\n\n", status));

    report.push_str(&format!(
        "Top {} important articles based on PageRank:\n",
        data.top.len()
    ));
    for entry in &data.top {
        report.push_str(&format_ranked_line(entry));
        report.push('\n');
    }

    report
}

pub fn generate_json_report(data: &RankReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Linkrank",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "crawl": {
                "seed": data.seed_url,
                "pages_crawled": data.pages_crawled,
                "failed_pages": data.failed_pages
            },
            "graph": {
                "nodes": data.node_count,
                "edges": data.edge_count
            },
            "ranking": {
                "status": data.status,
                "iterations": data.iterations,
                "top": data.top
            }
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
