// Iterative link-authority (PageRank) scoring

use crate::error::RankError;
use crate::graph::LinkGraph;
use linkrank_scanner::PageId;
use petgraph::Direction;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_TOP_K: usize = 3;

/// Page -> score. Sums to 1.0 over all graph nodes.
pub type ScoreTable = BTreeMap<PageId, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Probability of following a link rather than jumping to a random page.
    pub damping: f64,
    /// Stop once no score moves by this much in one iteration.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Number of pages returned by selection.
    pub top_k: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl RankConfig {
    pub fn validate(&self) -> Result<(), RankError> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(RankError::InvalidConfig(format!(
                "damping factor must be within [0, 1], got {}",
                self.damping
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(RankError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// How the iteration ended. Both outcomes carry usable scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStatus {
    Converged,
    CapReached,
}

#[derive(Debug, Clone)]
pub struct Ranking {
    scores: ScoreTable,
    iterations: usize,
    status: RankStatus,
}

impl Ranking {
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn score(&self, page: &PageId) -> Option<f64> {
        self.scores.get(page).copied()
    }

    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn status(&self) -> RankStatus {
        self.status
    }

    pub fn is_converged(&self) -> bool {
        self.status == RankStatus::Converged
    }

    /// The `k` best pages: score descending, ties broken by page id
    /// ascending.
    pub fn top(&self, k: usize) -> Vec<(PageId, f64)> {
        let mut ranked: Vec<(&PageId, f64)> =
            self.scores.iter().map(|(page, &score)| (page, score)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(k)
            .map(|(page, score)| (page.clone(), score))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageRanker {
    config: RankConfig,
}

impl PageRanker {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    /// Score every node of `graph`.
    ///
    /// Each round a node receives `(1 - d) / N`, plus `d` times the share of
    /// each in-neighbour's score split over its out-links. Mass held by
    /// dangling nodes is spread evenly over all nodes, so the scores remain
    /// a probability distribution.
    pub fn rank(&self, graph: &LinkGraph) -> Result<Ranking, RankError> {
        self.config.validate()?;

        let g = graph.inner();
        let n = g.node_count();
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }

        let nodes = n as f64;
        let damping = self.config.damping;
        let out_degree: Vec<usize> = g
            .node_indices()
            .map(|idx| g.edges_directed(idx, Direction::Outgoing).count())
            .collect();

        let mut scores = vec![1.0 / nodes; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut status = RankStatus::CapReached;

        while iterations < self.config.max_iterations {
            iterations += 1;

            let dangling_mass: f64 = out_degree
                .iter()
                .zip(&scores)
                .filter(|(degree, _)| **degree == 0)
                .map(|(_, score)| score)
                .sum();
            next.fill((1.0 - damping) / nodes + damping * dangling_mass / nodes);

            for edge in g.edge_references() {
                let from = edge.source().index();
                let to = edge.target().index();
                next[to] += damping * scores[from] / out_degree[from] as f64;
            }

            let delta = scores
                .iter()
                .zip(&next)
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, f64::max);
            std::mem::swap(&mut scores, &mut next);

            debug!("Iteration {}: max delta {:.3e}", iterations, delta);
            if delta < self.config.tolerance {
                status = RankStatus::Converged;
                break;
            }
        }

        match status {
            RankStatus::Converged => info!("Ranking converged after {} iterations", iterations),
            RankStatus::CapReached => info!(
                "Ranking stopped at the iteration cap ({}) without converging",
                iterations
            ),
        }

        let scores = g
            .node_indices()
            .map(|idx| (g[idx].clone(), scores[idx.index()]))
            .collect();

        Ok(Ranking {
            scores,
            iterations,
            status,
        })
    }
}
