//! Degree extremes

use std::cmp::Reverse;

use petgraph::graph::NodeIndex;

use crate::error::{AnalysisError, Result};
use crate::graph::SocialGraph;

/// Node with the highest degree and that degree.
///
/// Ties go to the node that comes first in iteration order.
pub fn node_with_max_degree(graph: &SocialGraph) -> Result<(NodeIndex, usize)> {
    // min_by_key keeps the first of equal keys, max_by_key the last
    graph
        .nodes()
        .map(|node| (node, graph.degree(node)))
        .min_by_key(|&(_, degree)| Reverse(degree))
        .ok_or(AnalysisError::EmptyGraph)
}

/// Node with the lowest degree and that degree, first in iteration order on ties
pub fn node_with_min_degree(graph: &SocialGraph) -> Result<(NodeIndex, usize)> {
    graph
        .nodes()
        .map(|node| (node, graph.degree(node)))
        .min_by_key(|&(_, degree)| degree)
        .ok_or(AnalysisError::EmptyGraph)
}
