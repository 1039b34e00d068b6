//! Graph representation module

pub mod builder;
pub mod social;
pub mod subgraph;

pub use builder::GraphBuilder;
pub use petgraph::graph::NodeIndex;
pub use social::SocialGraph;
pub use subgraph::Subgraph;
