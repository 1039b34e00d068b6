//! Visualization generation module

pub mod figure;
pub mod layout;

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::community::{community_influencers, community_with_node, find_communities, find_community_influencers};
use crate::config::Config;
use crate::error::Result;
use crate::graph::SocialGraph;

pub use figure::{community_color, Figure, INFLUENCER_COLOR, REGULAR_COLOR};
pub use layout::{spring_layout, Point};

/// Draw the graph with each Louvain community in its own color
pub fn draw_communities(graph: &SocialGraph, config: &Config) -> Figure {
    log::info!("Drawing communities for {} nodes", graph.node_count());

    let positions = spring_layout(graph, config.layout_seed, config.layout_iterations);
    let communities = find_communities(graph, config);
    let max_id = communities.len().saturating_sub(1);

    let fills = graph
        .nodes()
        .map(|node| community_color(communities.community_of(node).unwrap_or(0), max_id))
        .collect();

    Figure::new("Communities", graph, &positions, fills, config.with_labels)
}

/// Draw the whole graph, influencers of every community in red and the rest in green
pub fn draw_community_influencers(graph: &SocialGraph, config: &Config) -> Figure {
    log::info!("Drawing community influencers for {} nodes", graph.node_count());

    let influencers: HashSet<NodeIndex> = find_community_influencers(graph, config)
        .into_values()
        .flatten()
        .collect();
    let positions = spring_layout(graph, config.layout_seed, config.layout_iterations);

    let fills = graph
        .nodes()
        .map(|node| influence_fill(influencers.contains(&node)))
        .collect();

    Figure::new("Community influencers", graph, &positions, fills, config.with_labels)
}

/// Draw only the community containing `label`, highlighting its influencers
pub fn draw_community_with_node(graph: &SocialGraph, label: &str, config: &Config) -> Result<Figure> {
    let members = community_with_node(graph, label, config)?;
    log::info!("Drawing community of {} ({} members)", label, members.len());

    let influencers: HashSet<NodeIndex> =
        community_influencers(graph, &members, config.influencer_top_n)
            .into_iter()
            .collect();

    let subgraph = graph.induced_subgraph(&members);
    let positions = spring_layout(subgraph.graph(), config.layout_seed, config.layout_iterations);
    let fills = subgraph
        .graph()
        .nodes()
        .map(|node| influence_fill(influencers.contains(&subgraph.to_parent(node))))
        .collect();

    let figure = Figure::new(
        format!("Community of {}", label),
        subgraph.graph(),
        &positions,
        fills,
        config.with_labels,
    );
    Ok(figure.with_node_outline("black"))
}

fn influence_fill(is_influencer: bool) -> String {
    if is_influencer {
        INFLUENCER_COLOR.to_string()
    } else {
        REGULAR_COLOR.to_string()
    }
}
