//! Error type shared by the loader, analysis and rendering code

use thiserror::Error;

/// Failures surfaced while loading, analyzing or rendering a campus graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Reading the input or writing an output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid JSON or does not match the graph schema
    #[error("Invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input declares no nodes
    #[error("Graph contains no nodes")]
    EmptyGraph,

    /// An edge names a node identifier that is not in the node list
    #[error("Edge #{index} references unknown node '{id}'")]
    UnknownNode {
        /// Position of the offending edge in the input
        index: usize,
        /// The identifier that could not be resolved
        id: String,
    },

    /// A weight cannot be used as a path length
    #[error("Edge {from} - {to} has invalid weight {weight}; path lengths need finite, non-negative weights")]
    InvalidWeight {
        /// One endpoint of the edge
        from: String,
        /// The other endpoint of the edge
        to: String,
        /// The rejected weight
        weight: f64,
    },

    /// A route endpoint matched no node
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    /// The plotting backend failed
    #[error("Render error: {0}")]
    Render(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, GraphError>;
