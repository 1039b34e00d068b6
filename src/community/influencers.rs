//! Community influencers: nodes ranked near the top of both betweenness
//! and closeness inside their own community

use std::collections::{BTreeMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::centrality::{first_n_highest_betweenness_nodes, first_n_highest_closeness_nodes};
use crate::community::{find_communities, Communities};
use crate::config::Config;
use crate::graph::SocialGraph;

/// Influencers among `members`, computed on their induced subgraph.
///
/// The result is the intersection of the subgraph's top `top_n` betweenness
/// and top `top_n` closeness nodes, in betweenness order, as parent indices.
pub fn community_influencers(
    graph: &SocialGraph,
    members: &[NodeIndex],
    top_n: usize,
) -> Vec<NodeIndex> {
    let subgraph = graph.induced_subgraph(members);
    let top_betweenness = first_n_highest_betweenness_nodes(subgraph.graph(), top_n).top;
    let top_closeness: HashSet<NodeIndex> = first_n_highest_closeness_nodes(subgraph.graph(), top_n)
        .top
        .into_iter()
        .collect();

    let shared: Vec<NodeIndex> = top_betweenness
        .into_iter()
        .filter(|node| top_closeness.contains(node))
        .collect();

    subgraph.to_parent_all(&shared)
}

/// Influencers of every community in an existing grouping
pub fn influencers_of(
    graph: &SocialGraph,
    communities: &Communities,
    top_n: usize,
) -> BTreeMap<usize, Vec<NodeIndex>> {
    communities
        .iter()
        .map(|(id, members)| (id, community_influencers(graph, members, top_n)))
        .collect()
}

/// Partition the graph and find each community's influencers
pub fn find_community_influencers(
    graph: &SocialGraph,
    config: &Config,
) -> BTreeMap<usize, Vec<NodeIndex>> {
    let communities = find_communities(graph, config);
    influencers_of(graph, &communities, config.influencer_top_n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_center_is_the_influencer() {
        let graph = SocialGraph::from_edges([("hub", "a"), ("hub", "b"), ("hub", "c"), ("hub", "d"), ("x", "y")]);
        let members: Vec<NodeIndex> = ["hub", "a", "b", "c", "d"]
            .iter()
            .map(|l| graph.node_index(l).unwrap())
            .collect();

        // top-1 of both rankings is the hub
        let influencers = community_influencers(&graph, &members, 1);
        assert_eq!(graph.labels(&influencers), vec!["hub"]);
    }

    #[test]
    fn small_communities_still_truncate() {
        let graph = SocialGraph::from_edges([("a", "b")]);
        let members: Vec<NodeIndex> = graph.nodes().collect();
        let influencers = community_influencers(&graph, &members, 3);
        assert_eq!(influencers.len(), 2);
    }

    #[test]
    fn influencers_are_members() {
        let graph = SocialGraph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)]);
        let config = Config::default().with_louvain_seed(11);
        let communities = find_communities(&graph, &config);
        let influencers = influencers_of(&graph, &communities, 3);

        assert_eq!(influencers.len(), communities.len());
        for (id, nodes) in &influencers {
            let members = communities.members(*id).unwrap();
            assert!(nodes.len() <= 3);
            assert!(nodes.iter().all(|node| members.contains(node)));
        }
    }
}
