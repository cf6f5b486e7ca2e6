use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use linkrank_core::crawl::{
    CrawlOptions, CrawlProgressCallback, execute_crawl, execute_rank, generate_crawl_report,
};
use linkrank_core::render::render_dot;
use linkrank_core::report::{
    ReportFormat, generate_json_report, generate_text_report, save_report,
};
use linkrank_core::{LinkGraph, RankConfig};
use linkrank_scanner::{CrawlConfig, PageId};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use url::Url;

// Helper functions for handlers

/// Split a seed argument into (origin, page path).
///
/// Accepts a full URL (its origin replaces `origin`), a root-relative path,
/// or a bare article title which is placed under `path_prefix`.
pub fn parse_seed(
    input: &str,
    origin: &str,
    path_prefix: &str,
) -> Result<(String, String), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Seed page must not be empty".to_string());
    }

    if let Ok(url) = Url::parse(input)
        && url.host_str().is_some()
    {
        let mut seed = url.path().to_string();
        if let Some(query) = url.query() {
            seed.push('?');
            seed.push_str(query);
        }
        return Ok((url.origin().ascii_serialization(), seed));
    }

    if input.starts_with('/') {
        return Ok((origin.to_string(), input.to_string()));
    }

    Ok((
        origin.to_string(),
        format!("{}{}", path_prefix, input.replace(' ', "_")),
    ))
}

/// Build pipeline options from `crawl`/`rank` arguments. Ranking arguments
/// that the subcommand lacks keep their defaults.
pub fn crawl_options_from_matches(args: &ArgMatches) -> Result<CrawlOptions, String> {
    let seed = string_arg(args, "seed")?;
    let origin = string_arg(args, "origin")?;
    let prefix = string_arg(args, "prefix")?;
    let (origin, seed) = parse_seed(&seed, &origin, &prefix)?;

    let crawl = CrawlConfig::new(&origin, &seed)
        .map_err(|e| e.to_string())?
        .with_path_prefix(prefix)
        .with_max_pages(usize_arg(args, "pages")?)
        .with_max_links(usize_arg(args, "links")?)
        .with_timeout(
            args.get_one::<u64>("timeout")
                .copied()
                .ok_or("Missing --timeout")?,
        );

    let mut rank = RankConfig::default();
    if let Ok(Some(top_k)) = args.try_get_one::<usize>("top") {
        rank.top_k = *top_k;
    }
    if let Ok(Some(damping)) = args.try_get_one::<f64>("damping") {
        rank.damping = *damping;
    }
    if let Ok(Some(tolerance)) = args.try_get_one::<f64>("tolerance") {
        rank.tolerance = *tolerance;
    }
    if let Ok(Some(max_iterations)) = args.try_get_one::<usize>("max-iterations") {
        rank.max_iterations = *max_iterations;
    }
    rank.validate().map_err(|e| e.to_string())?;

    debug!("Crawl config: {:?}", crawl);
    debug!("Rank config: {:?}", rank);

    Ok(CrawlOptions {
        crawl,
        rank,
        show_progress_bars: true,
    })
}

fn string_arg(args: &ArgMatches, name: &str) -> Result<String, String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("Missing --{}", name))
}

fn usize_arg(args: &ArgMatches, name: &str) -> Result<usize, String> {
    args.get_one::<usize>(name)
        .copied()
        .ok_or_else(|| format!("Missing --{}", name))
}

pub fn print_banner() {
    println!(
        "{}",
        r#"
  _ _       _                     _
 | (_)_ __ | | ___ __ __ _ _ __ | | __
 | | | '_ \| |/ / '__/ _` | '_ \| |/ /
 | | | | | |   <| | | (_| | | | |   <
 |_|_|_| |_|_|\_\_|  \__,_|_| |_|_|\_\
"#
        .cyan()
        .bold()
    );
    println!(
        "  {} {}\n",
        "crawl, link, rank".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}

pub fn print_divider() {
    println!("{}", "━".repeat(60).bright_black());
}

fn print_crawl_config(options: &CrawlOptions) {
    let seed_url = options
        .crawl
        .seed_url()
        .map(|u| u.to_string())
        .unwrap_or_else(|_| options.crawl.seed.to_string());
    println!("{} {}", "Seed:".blue(), seed_url.bright_white());
    println!(
        "{} {} pages, {} links per page",
        "Budget:".blue(),
        options.crawl.max_pages.to_string().cyan(),
        options.crawl.max_links.to_string().cyan()
    );
}

fn write_dot(
    graph: &LinkGraph,
    highlighted: &[PageId],
    prefix: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let dot = render_dot(graph, highlighted, prefix);
    save_report(&dot, path)
        .with_context(|| format!("Failed to write graph to {}", path.display()))?;
    println!(
        "{} Graph written to {}",
        "✓".green().bold(),
        path.display().to_string().bright_white()
    );
    Ok(())
}

pub async fn handle_crawl(args: &ArgMatches) -> anyhow::Result<()> {
    let options = crawl_options_from_matches(args).map_err(|e| anyhow!(e))?;

    println!("\n🕷️  Crawling");
    print_crawl_config(&options);
    println!();

    let (report, graph) = execute_crawl(&options).await?;

    println!("\n{} Crawl complete!\n", "✓".green().bold());
    print!("{}", generate_crawl_report(&report, &graph));

    if let Some(path) = args.get_one::<PathBuf>("dot") {
        write_dot(&graph, &[], &options.crawl.path_prefix, path)?;
    }

    Ok(())
}

pub async fn handle_rank(args: &ArgMatches) -> anyhow::Result<()> {
    let options = crawl_options_from_matches(args).map_err(|e| anyhow!(e))?;
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);

    println!("\n🕷️  Crawling and ranking");
    print_crawl_config(&options);
    println!(
        "{} damping {}, tolerance {:e}, at most {} iterations, top {}",
        "Ranking:".blue(),
        options.rank.damping,
        options.rank.tolerance,
        options.rank.max_iterations,
        options.rank.top_k
    );
    println!();

    let progress_callback: CrawlProgressCallback = Arc::new(|msg: String| {
        println!("{} {}", "→".blue(), msg);
    });

    let output = execute_rank(&options, Some(progress_callback)).await?;

    let report = match format {
        ReportFormat::Text => generate_text_report(&output.report),
        ReportFormat::Json => generate_json_report(&output.report)?,
    };

    println!();
    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            save_report(&report, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => {
            print_divider();
            print!("{}", report);
            print_divider();
        }
    }

    if let Some(path) = args.get_one::<PathBuf>("dot") {
        write_dot(
            &output.graph,
            &output.report.top_pages(),
            &options.crawl.path_prefix,
            path,
        )?;
    }

    Ok(())
}
