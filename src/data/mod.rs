//! Graph input loading

pub mod edgelist;
pub mod parquet;

use anyhow::Result;
use clap::ValueEnum;

use crate::graph::SocialGraph;

/// On-disk layout of the input graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Pick by file extension: `.parquet` is Parquet, anything else an edge list
    Auto,
    #[value(name = "edgelist")]
    EdgeList,
    Parquet,
}

impl InputFormat {
    fn resolve(self, path: &str) -> InputFormat {
        match self {
            InputFormat::Auto if path.ends_with(".parquet") => InputFormat::Parquet,
            InputFormat::Auto => InputFormat::EdgeList,
            other => other,
        }
    }
}

/// Load a graph from `path`. The column names only apply to Parquet input.
pub fn load_graph(
    path: &str,
    format: InputFormat,
    source_column: &str,
    target_column: &str,
) -> Result<SocialGraph> {
    let graph = match format.resolve(path) {
        InputFormat::Parquet => parquet::load_edge_table(path, source_column, target_column)?,
        _ => edgelist::load_edge_list(path)?,
    };

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}
