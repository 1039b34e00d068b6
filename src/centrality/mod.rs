//! Centrality measures and top-N rankings

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;

use std::fmt;

use itertools::Itertools;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::graph::SocialGraph;

pub use betweenness::betweenness_centrality;
pub use closeness::closeness_centrality;
pub use degree::{node_with_max_degree, node_with_min_degree};
pub use eigenvector::eigenvector_centrality;

/// Graphs below this node count run BFS sources sequentially
pub(crate) const PARALLEL_THRESHOLD: usize = 1000;

/// Which centrality a set of scores holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Centrality {
    Betweenness,
    Closeness,
    Eigenvector,
}

impl fmt::Display for Centrality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Centrality::Betweenness => "Betweenness",
            Centrality::Closeness => "Closeness",
            Centrality::Eigenvector => "Eigenvector",
        };
        f.write_str(name)
    }
}

/// One score per node, indexed by `NodeIndex`
#[derive(Debug, Clone)]
pub struct CentralityScores {
    kind: Centrality,
    values: Vec<f64>,
}

impl CentralityScores {
    pub fn new(kind: Centrality, values: Vec<f64>) -> Self {
        Self { kind, values }
    }

    pub fn kind(&self) -> Centrality {
        self.kind
    }

    pub fn get(&self, node: NodeIndex) -> f64 {
        self.values[node.index()]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// All nodes by descending score. Equal scores keep iteration order.
    pub fn ranked(&self) -> Vec<NodeIndex> {
        (0..self.values.len())
            .map(NodeIndex::new)
            .sorted_by(|a, b| self.values[b.index()].total_cmp(&self.values[a.index()]))
            .collect()
    }
}

/// Top-N nodes of a centrality together with the full score table
#[derive(Debug, Clone)]
pub struct Ranking {
    pub top: Vec<NodeIndex>,
    pub scores: CentralityScores,
}

impl Ranking {
    /// Rank `scores` and keep the first `n` nodes (fewer if the graph is smaller)
    pub fn from_scores(scores: CentralityScores, n: usize) -> Self {
        let top = scores.ranked().into_iter().take(n).collect();
        Self { top, scores }
    }

    pub fn highest(&self) -> Option<NodeIndex> {
        self.top.first().copied()
    }

    pub fn lowest(&self) -> Option<NodeIndex> {
        self.top.last().copied()
    }
}

/// First `n` nodes by betweenness centrality, highest first
pub fn first_n_highest_betweenness_nodes(graph: &SocialGraph, n: usize) -> Ranking {
    Ranking::from_scores(betweenness_centrality(graph), n)
}

/// First `n` nodes by closeness centrality, highest first
pub fn first_n_highest_closeness_nodes(graph: &SocialGraph, n: usize) -> Ranking {
    Ranking::from_scores(closeness_centrality(graph), n)
}

/// First `n` nodes by eigenvector centrality, highest first.
///
/// Fails on an empty graph, or on a graph above the dense solver's size when
/// Lanczos does not converge within `config.eigenvector_max_restarts`.
pub fn first_n_highest_eigenvector_nodes(
    graph: &SocialGraph,
    n: usize,
    config: &Config,
) -> Result<Ranking> {
    let scores = eigenvector_centrality(
        graph,
        config.eigenvector_max_restarts,
        config.eigenvector_tolerance,
    )?;
    Ok(Ranking::from_scores(scores, n))
}
