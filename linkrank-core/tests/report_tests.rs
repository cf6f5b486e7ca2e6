// Tests for report generation

use linkrank_core::report::{
    RankReport, RankedPage, ReportFormat, format_ranked_line, generate_json_report,
    generate_text_report, save_report,
};
use linkrank_core::{LinkGraph, PageRanker, RankStatus};
use linkrank_scanner::{CrawlReport, CrawlResult, PageId};
use tempfile::NamedTempFile;
use url::Url;

fn page(path: &str) -> PageId {
    PageId::from(path)
}

fn origin() -> Url {
    Url::parse("https://en.wikipedia.org").unwrap()
}

fn scenario_report() -> RankReport {
    let mut results = Vec::new();
    for (source, links) in [
        ("/wiki/A", vec!["/wiki/B", "/wiki/C"]),
        ("/wiki/B", vec!["/wiki/A"]),
        ("/wiki/C", vec!["/wiki/A", "/wiki/D"]),
    ] {
        let mut result = CrawlResult::new(page(source), format!("https://en.wikipedia.org{}", source));
        result.links_found = links.into_iter().map(page).collect();
        results.push(result);
    }
    results.push(CrawlResult::with_error(
        page("/wiki/E"),
        "https://en.wikipedia.org/wiki/E".to_string(),
        "timeout".to_string(),
    ));
    let crawl = CrawlReport { results };

    let graph = LinkGraph::from_crawl(&crawl);
    let ranking = PageRanker::default().rank(&graph).unwrap();
    RankReport::build(&crawl, &graph, &ranking, 3, &origin(), &page("/wiki/A"), "/wiki/").unwrap()
}

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("pdf"), None);
}

#[test]
fn test_ranked_line_format() {
    let entry = RankedPage {
        rank: 1,
        page: page("/wiki/Data_science"),
        label: "Data science".to_string(),
        url: "https://en.wikipedia.org/wiki/Data_science".to_string(),
        score: 0.123456,
    };

    assert_eq!(
        format_ranked_line(&entry),
        "Data science: 0.12346 (https://en.wikipedia.org/wiki/Data_science)"
    );
}

#[test]
fn test_build_collects_statistics() {
    let report = scenario_report();

    assert_eq!(report.seed_url, "https://en.wikipedia.org/wiki/A");
    assert_eq!(report.pages_crawled, 4);
    assert_eq!(report.failed_pages, 1);
    assert_eq!(report.node_count, 4);
    assert_eq!(report.edge_count, 5);
    assert_eq!(report.status, RankStatus::Converged);

    let ranks: Vec<usize> = report.top.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(report.top[0].label, "A");
    assert_eq!(report.top[0].url, "https://en.wikipedia.org/wiki/A");
    assert_eq!(report.top_pages(), vec![page("/wiki/A"), page("/wiki/B"), page("/wiki/C")]);
}

#[test]
fn test_text_report() {
    let text = generate_text_report(&scenario_report());

    assert!(text.contains("LINKRANK REPORT"));
    assert!(text.contains("Pages crawled: 4 (1 failed)"));
    assert!(text.contains("Graph:         4 nodes, 5 edges"));
    assert!(text.contains("Top 3 important articles based on PageRank:"));
    assert!(text.contains("A: 0.3676"));
    assert!(text.contains("(https://en.wikipedia.org/wiki/B)"));
}

#[test]
fn test_json_report() {
    let json = generate_json_report(&scenario_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let ranking = &value["report"]["ranking"];
    assert_eq!(ranking["status"], "converged");
    assert_eq!(ranking["top"].as_array().unwrap().len(), 3);
    assert_eq!(ranking["top"][0]["page"], "/wiki/A");
    assert_eq!(value["report"]["graph"]["edges"], 5);
    assert!(value["report"]["metadata"]["generated_at"].is_string());
}

#[test]
fn test_save_report() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new()?;
    let text = generate_text_report(&scenario_report());

    save_report(&text, file.path())?;

    assert_eq!(std::fs::read_to_string(file.path())?, text);
    Ok(())
}
