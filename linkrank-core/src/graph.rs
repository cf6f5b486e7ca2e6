// Directed link graph built from crawl adjacency

use linkrank_scanner::{CrawlReport, PageId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

/// Immutable directed graph of pages and the links between them.
///
/// Nodes are every page seen as a link source or target. There are no
/// parallel edges.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    graph: DiGraph<PageId, ()>,
    index: HashMap<PageId, NodeIndex>,
}

impl LinkGraph {
    /// Build from page -> outgoing links. Every source becomes a node, even
    /// with an empty link list.
    pub fn from_adjacency<'a, I>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (&'a PageId, &'a [PageId])>,
    {
        let mut graph = Self::default();
        for (source, targets) in adjacency {
            let from = graph.node(source);
            for target in targets {
                let to = graph.node(target);
                if graph.graph.find_edge(from, to).is_none() {
                    graph.graph.add_edge(from, to, ());
                }
            }
        }
        graph
    }

    /// Build from a crawl. Pages whose fetch failed are left out as sources;
    /// they only show up if some fetched page links to them.
    pub fn from_crawl(report: &CrawlReport) -> Self {
        Self::from_adjacency(
            report
                .results
                .iter()
                .filter(|r| r.is_success())
                .map(|r| (&r.page, r.links_found.as_slice())),
        )
    }

    fn node(&mut self, page: &PageId) -> NodeIndex {
        if let Some(&idx) = self.index.get(page) {
            return idx;
        }
        let idx = self.graph.add_node(page.clone());
        self.index.insert(page.clone(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, page: &PageId) -> bool {
        self.index.contains_key(page)
    }

    pub fn contains_edge(&self, source: &PageId, target: &PageId) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    pub fn out_degree(&self, page: &PageId) -> Option<usize> {
        self.index.get(page).map(|&idx| {
            self.graph
                .edges_directed(idx, Direction::Outgoing)
                .count()
        })
    }

    /// Pages in the order they were first seen.
    pub fn nodes(&self) -> impl Iterator<Item = &PageId> {
        self.graph.node_weights()
    }

    /// Edge set as a plain value, independent of node arrival order.
    pub fn edge_set(&self) -> BTreeSet<(PageId, PageId)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| {
                (
                    self.graph[edge.source()].clone(),
                    self.graph[edge.target()].clone(),
                )
            })
            .collect()
    }

    /// Pages with no outgoing links.
    pub fn dangling(&self) -> Vec<&PageId> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(|idx| &self.graph[idx])
            .collect()
    }

    pub fn inner(&self) -> &DiGraph<PageId, ()> {
        &self.graph
    }
}
