//! Graph construction module

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};

use crate::graph::SocialGraph;

/// Builder for incrementally constructing a SocialGraph
pub struct GraphBuilder {
    /// Graph under construction
    graph: UnGraph<String, ()>,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, NodeIndex>,

    /// Edges already added, stored with the smaller index first
    edge_set: HashSet<(NodeIndex, NodeIndex)>,

    /// Self-loops dropped while building
    self_loops: usize,

    /// Repeated edges collapsed while building
    duplicate_edges: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a new graph builder with the given capacity
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
            edge_set: HashSet::with_capacity(edges),
            self_loops: 0,
            duplicate_edges: 0,
        }
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(id.to_string());
        self.id_to_index.insert(id.to_string(), idx);
        idx
    }

    /// Add an undirected edge. Returns false if it was a self-loop or already present.
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) -> bool {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        if src_idx == dst_idx {
            self.self_loops += 1;
            return false;
        }

        let key = (src_idx.min(dst_idx), src_idx.max(dst_idx));
        if !self.edge_set.insert(key) {
            self.duplicate_edges += 1;
            return false;
        }

        self.graph.add_edge(src_idx, dst_idx, ());
        true
    }

    /// Build the social graph
    pub fn build(self) -> SocialGraph {
        if self.self_loops > 0 || self.duplicate_edges > 0 {
            log::debug!(
                "Dropped {} self-loops and {} duplicate edges",
                self.self_loops,
                self.duplicate_edges
            );
        }

        SocialGraph::from_parts(self.graph, self.id_to_index)
    }
}
