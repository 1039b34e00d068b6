//! Core library functions for the social graph analyzer

pub mod centrality;
pub mod community;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod report;
pub mod viz;

pub use centrality::{
    first_n_highest_betweenness_nodes, first_n_highest_closeness_nodes,
    first_n_highest_eigenvector_nodes, node_with_max_degree, node_with_min_degree, Centrality,
    CentralityScores, Ranking,
};
pub use community::{
    community_influencers, community_with_node, find_communities, find_community_influencers,
    influencers_of, Communities,
};
pub use config::Config;
pub use error::{AnalysisError, Result};
pub use graph::{GraphBuilder, NodeIndex, SocialGraph};
pub use report::{problem_solver, summarize, Report, Summary};
pub use viz::{draw_communities, draw_community_influencers, draw_community_with_node, Figure};
