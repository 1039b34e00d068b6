//! Community detection and grouping

pub mod influencers;
pub mod louvain;

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use crate::config::Config;
use crate::error::Result;
use crate::graph::SocialGraph;

pub use influencers::{community_influencers, find_community_influencers, influencers_of};

/// A partition of the graph's nodes into communities.
///
/// Community ids are `0..len()`; members of each community are listed in
/// node iteration order.
#[derive(Debug, Clone, Default)]
pub struct Communities {
    /// Community id per node index
    assignment: Vec<usize>,

    /// Members per community id
    groups: Vec<Vec<NodeIndex>>,
}

impl Communities {
    /// Group a flat node -> community id assignment
    pub fn from_assignment(assignment: Vec<usize>) -> Self {
        let count = assignment.iter().max().map_or(0, |&max| max + 1);
        let mut groups: Vec<Vec<NodeIndex>> = vec![Vec::new(); count];
        for (node, &com) in assignment.iter().enumerate() {
            groups[com].push(NodeIndex::new(node));
        }
        Self { assignment, groups }
    }

    /// Number of communities
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn community_of(&self, node: NodeIndex) -> Option<usize> {
        self.assignment.get(node.index()).copied()
    }

    pub fn members(&self, id: usize) -> Option<&[NodeIndex]> {
        self.groups.get(id).map(Vec::as_slice)
    }

    /// Members of the community that contains `node`
    pub fn containing(&self, node: NodeIndex) -> Option<&[NodeIndex]> {
        self.community_of(node).and_then(|id| self.members(id))
    }

    /// (community id, members) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[NodeIndex])> {
        self.groups.iter().map(Vec::as_slice).enumerate()
    }

    pub fn to_map(&self) -> BTreeMap<usize, Vec<NodeIndex>> {
        self.groups.iter().cloned().enumerate().collect()
    }
}

/// Run Louvain on `graph` and group nodes by community
pub fn find_communities(graph: &SocialGraph, config: &Config) -> Communities {
    let assignment =
        louvain::best_partition(graph, config.louvain_resolution, config.louvain_seed);
    let communities = Communities::from_assignment(assignment);
    log::debug!(
        "Found {} communities over {} nodes",
        communities.len(),
        graph.node_count()
    );
    communities
}

/// Nodes sharing a community with `label`, from a fresh partition of the graph
pub fn community_with_node(
    graph: &SocialGraph,
    label: &str,
    config: &Config,
) -> Result<Vec<NodeIndex>> {
    let node = graph.require_node(label)?;
    let communities = find_communities(graph, config);
    Ok(communities.containing(node).map(<[NodeIndex]>::to_vec).unwrap_or_default())
}

/// Modularity of a grouping over `graph`
pub fn modularity(graph: &SocialGraph, communities: &Communities, resolution: f64) -> f64 {
    louvain::modularity(graph, communities.assignment(), resolution)
}
