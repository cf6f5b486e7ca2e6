use linkrank_scanner::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("Cannot rank an empty graph: no page was fetched successfully")]
    EmptyGraph,

    #[error("Invalid ranking configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Rank(#[from] RankError),
}
