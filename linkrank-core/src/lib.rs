pub mod crawl;
pub mod error;
pub mod graph;
pub mod rank;
pub mod render;
pub mod report;

pub use error::{PipelineError, RankError};
pub use graph::LinkGraph;
pub use rank::{PageRanker, RankConfig, RankStatus, Ranking, ScoreTable};
