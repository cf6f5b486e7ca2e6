pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod page;
pub mod result;

pub use config::CrawlConfig;
pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use extract::{AnchorExtractor, LinkExtractor, LinkFilter};
pub use fetch::{HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use page::PageId;
pub use result::{CrawlReport, CrawlResult};
