pub mod commands;
pub mod logging;

// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{crawl_options_from_matches, parse_seed};

// Re-export pipeline functionality from linkrank-core
pub use linkrank_core::crawl::{
    CrawlOptions, CrawlProgressCallback, PipelineOutput, execute_crawl, execute_rank,
    generate_crawl_report,
};
