//! Induced subgraph extraction

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::graph::SocialGraph;

/// A subgraph together with the mapping back to its parent's node indices
#[derive(Debug, Clone)]
pub struct Subgraph {
    graph: SocialGraph,

    /// origin[i] = parent index of subgraph node i
    origin: Vec<NodeIndex>,
}

impl Subgraph {
    pub fn graph(&self) -> &SocialGraph {
        &self.graph
    }

    /// Translate a subgraph node back to the parent graph
    pub fn to_parent(&self, node: NodeIndex) -> NodeIndex {
        self.origin[node.index()]
    }

    pub fn to_parent_all(&self, nodes: &[NodeIndex]) -> Vec<NodeIndex> {
        nodes.iter().map(|&node| self.to_parent(node)).collect()
    }
}

impl SocialGraph {
    /// Extract the subgraph induced by `members`, keeping their order.
    /// Repeated members are ignored.
    pub fn induced_subgraph(&self, members: &[NodeIndex]) -> Subgraph {
        // Create mapping from original to subgraph indices
        let mut orig_to_sub: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(members.len());
        let mut graph = UnGraph::with_capacity(members.len(), members.len());
        let mut index = HashMap::with_capacity(members.len());
        let mut origin = Vec::with_capacity(members.len());

        for &node in members {
            if orig_to_sub.contains_key(&node) {
                continue;
            }
            let label = self.label(node).to_string();
            let sub = graph.add_node(label.clone());
            index.insert(label, sub);
            orig_to_sub.insert(node, sub);
            origin.push(node);
        }

        // Only include edges where both endpoints are in the subgraph, once per pair
        for &node in &origin {
            for neighbor in self.neighbors(node) {
                if node.index() >= neighbor.index() {
                    continue;
                }
                if let Some(&sub_neighbor) = orig_to_sub.get(&neighbor) {
                    graph.add_edge(orig_to_sub[&node], sub_neighbor, ());
                }
            }
        }

        Subgraph {
            graph: SocialGraph::from_parts(graph, index),
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn induced_subgraph_keeps_internal_edges_only() {
        let graph = SocialGraph::from_edges([("a", "b"), ("b", "c"), ("c", "d"), ("a", "c")]);
        let members: Vec<NodeIndex> = ["a", "b", "c"]
            .iter()
            .map(|l| graph.node_index(l).unwrap())
            .collect();

        let sub = graph.induced_subgraph(&members);
        assert_eq!(sub.graph().node_count(), 3);
        assert_eq!(sub.graph().edge_count(), 3);
        assert!(sub.graph().node_index("d").is_none());

        for node in sub.graph().nodes() {
            let parent = sub.to_parent(node);
            assert_eq!(graph.label(parent), sub.graph().label(node));
        }
    }
}
