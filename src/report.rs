//! Summary report over a whole graph

use std::fmt;

use serde::Serialize;

use crate::centrality::{
    first_n_highest_betweenness_nodes, first_n_highest_closeness_nodes,
    first_n_highest_eigenvector_nodes, node_with_max_degree, node_with_min_degree, Ranking,
};
use crate::community::{find_communities, modularity};
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::graph::SocialGraph;
use crate::viz::{draw_communities, draw_community_influencers, Figure};

/// Highest and lowest ranked node for one centrality
#[derive(Debug, Clone, Serialize)]
pub struct Extremes {
    pub highest: String,
    pub lowest: String,
}

impl Extremes {
    fn from_ranking(graph: &SocialGraph, ranking: &Ranking) -> Result<Self> {
        let highest = ranking.highest().ok_or(AnalysisError::EmptyGraph)?;
        let lowest = ranking.lowest().ok_or(AnalysisError::EmptyGraph)?;
        Ok(Self {
            highest: graph.label(highest).to_string(),
            lowest: graph.label(lowest).to_string(),
        })
    }
}

/// Degree extremes, centrality extremes and community count of a graph
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub node_count: usize,
    pub edge_count: usize,
    pub max_degree_node: String,
    pub max_degree: usize,
    pub min_degree_node: String,
    pub min_degree: usize,
    pub betweenness: Extremes,
    pub closeness: Extremes,
    pub eigenvector: Extremes,
    pub community_count: usize,
    pub modularity: f64,
}

/// The summary together with the two overview figures
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: Summary,
    pub communities: Figure,
    pub influencers: Figure,
}

/// Compute the summary of `graph`. Fails on an empty graph or when
/// eigenvector centrality does not converge.
pub fn summarize(graph: &SocialGraph, config: &Config) -> Result<Summary> {
    let (max_node, max_degree) = node_with_max_degree(graph)?;
    let (min_node, min_degree) = node_with_min_degree(graph)?;
    let node_count = graph.node_count();

    let betweenness = first_n_highest_betweenness_nodes(graph, node_count);
    let closeness = first_n_highest_closeness_nodes(graph, node_count);
    let eigenvector = first_n_highest_eigenvector_nodes(graph, node_count, config)?;

    let communities = find_communities(graph, config);

    Ok(Summary {
        node_count,
        edge_count: graph.edge_count(),
        max_degree_node: graph.label(max_node).to_string(),
        max_degree,
        min_degree_node: graph.label(min_node).to_string(),
        min_degree,
        betweenness: Extremes::from_ranking(graph, &betweenness)?,
        closeness: Extremes::from_ranking(graph, &closeness)?,
        eigenvector: Extremes::from_ranking(graph, &eigenvector)?,
        community_count: communities.len(),
        modularity: modularity(graph, &communities, config.louvain_resolution),
    })
}

/// Summary plus the communities and influencers figures
pub fn problem_solver(graph: &SocialGraph, config: &Config) -> Result<Report> {
    log::info!(
        "Summarizing graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let summary = summarize(graph, config)?;
    let communities = draw_communities(graph, config);
    let influencers = draw_community_influencers(graph, config);

    Ok(Report {
        summary,
        communities,
        influencers,
    })
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The node with highest degree: {}", self.max_degree_node)?;
        writeln!(f, "The degree of the node with the highest degree: {}", self.max_degree)?;
        writeln!(f)?;
        writeln!(f, "The node with lowest degree: {}", self.min_degree_node)?;
        writeln!(f, "The degree of the node with the lowest degree: {}", self.min_degree)?;
        writeln!(f)?;

        for (name, extremes) in [
            ("Betweenness", &self.betweenness),
            ("Closeness", &self.closeness),
            ("Eigenvector", &self.eigenvector),
        ] {
            writeln!(f, "The node with highest {} Centrality: {}", name, extremes.highest)?;
            writeln!(f, "The node with lowest {} Centrality: {}", name, extremes.lowest)?;
            writeln!(f)?;
        }

        writeln!(f, "The number of communities in the graph: {}", self.community_count)?;
        writeln!(f, "Modularity of the partition: {:.4}", self.modularity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_summary() {
        let graph = SocialGraph::from_edges([("hub", "a"), ("hub", "b"), ("hub", "c"), ("hub", "d")]);
        let summary = summarize(&graph, &Config::default().with_louvain_seed(2)).unwrap();

        assert_eq!(summary.max_degree_node, "hub");
        assert_eq!(summary.max_degree, 4);
        assert_eq!(summary.min_degree_node, "a");
        assert_eq!(summary.min_degree, 1);
        assert_eq!(summary.betweenness.highest, "hub");
        assert_eq!(summary.closeness.highest, "hub");
        assert_eq!(summary.eigenvector.highest, "hub");
        assert_eq!(summary.betweenness.lowest, "d");
        assert_eq!(summary.community_count, 1);

        let text = summary.to_string();
        assert!(text.contains("The node with highest degree: hub"));
        assert!(text.contains("The node with highest Closeness Centrality: hub"));
        assert!(text.contains("The number of communities in the graph: 1"));
    }

    #[test]
    fn empty_graph_cannot_be_summarized() {
        let err = summarize(&SocialGraph::default(), &Config::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyGraph));
    }

    #[test]
    fn report_carries_both_figures() {
        let graph = SocialGraph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let report = problem_solver(&graph, &Config::default().with_louvain_seed(9)).unwrap();
        assert_eq!(report.summary.community_count, 2);
        assert_eq!(report.communities.nodes.len(), 6);
        assert_eq!(report.influencers.nodes.len(), 6);
    }
}
