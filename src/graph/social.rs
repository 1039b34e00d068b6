//! Undirected, unweighted social graph keyed by node labels

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::{AnalysisError, Result};
use crate::graph::builder::GraphBuilder;

/// Simple undirected graph over string-labelled nodes.
///
/// Nodes iterate in insertion order; every "first encountered" tie-break in
/// the crate refers to this order. The graph is never mutated by analysis:
/// scores and community ids are returned as separate values.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    /// Underlying petgraph storage, node weight = label
    graph: UnGraph<String, ()>,

    /// Label -> node index
    index: HashMap<String, NodeIndex>,
}

impl SocialGraph {
    pub(crate) fn from_parts(graph: UnGraph<String, ()>, index: HashMap<String, NodeIndex>) -> Self {
        Self { graph, index }
    }

    /// Build a graph from `(source, target)` pairs; labels are taken from `ToString`
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: ToString,
    {
        let mut builder = GraphBuilder::new();
        for (src, dst) in edges {
            builder.add_edge(&src.to_string(), &dst.to_string());
        }
        builder.build()
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

    /// Node indices in iteration order
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Edge endpoints, each undirected edge once
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(move |edge| self.graph.edge_endpoints(edge))
    }

    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(node)
    }

    pub fn degree(&self, node: NodeIndex) -> usize {
        self.graph.neighbors(node).count()
    }

    pub fn label(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// Resolve a list of nodes to their labels
    pub fn labels(&self, nodes: &[NodeIndex]) -> Vec<&str> {
        nodes.iter().map(|&node| self.label(node)).collect()
    }

    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    /// Like [`node_index`](Self::node_index) but unknown labels are an error
    pub fn require_node(&self, label: &str) -> Result<NodeIndex> {
        self.node_index(label)
            .ok_or_else(|| AnalysisError::NodeNotFound(label.to_string()))
    }

    pub fn contains_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    pub fn as_petgraph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }
}
