//! Error types for graph analysis

use thiserror::Error;

/// Errors raised by the analysis functions
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The operation needs at least one node
    #[error("graph has no nodes")]
    EmptyGraph,

    /// A node label was looked up that the graph does not contain
    #[error("node not found in graph: {0}")]
    NodeNotFound(String),

    /// Lanczos ran out of restarts before the Ritz residual met the tolerance
    #[error("eigenvector centrality failed to converge in {restarts} Lanczos restarts")]
    EigenvectorNotConverged { restarts: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
