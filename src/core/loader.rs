//! JSON loader for campus graph documents
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "E1", "type": "entrance", "x": 120, "y": 48 }],
//!   "edges": [{ "source": "E1", "target": "H1", "weight": 35 }],
//!   "metadata": { "imageWidth": 1920, "imageHeight": 1080 }
//! }
//! ```

use crate::core::error::{GraphError, Result};
use crate::core::models::{CampusGraph, ImageMetadata, Node, NodeKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A node record as it appears in the input. Unlisted fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    /// Unique node identifier
    pub id: String,
    /// Raw type label
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Horizontal image coordinate
    #[serde(default)]
    pub x: Option<f64>,
    /// Vertical image coordinate
    #[serde(default)]
    pub y: Option<f64>,
}

/// An edge record as it appears in the input
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    /// One endpoint identifier
    pub source: String,
    /// Other endpoint identifier
    pub target: String,
    /// Distance between the endpoints
    pub weight: f64,
}

/// Optional information about the traced source image
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Source image width in pixels
    pub image_width: Option<u64>,
    /// Source image height in pixels
    pub image_height: Option<u64>,
}

/// The whole input document
#[derive(Debug, Clone, Deserialize)]
pub struct GraphDocument {
    /// Node records
    pub nodes: Vec<NodeRecord>,
    /// Edge records
    pub edges: Vec<EdgeRecord>,
    /// Optional metadata block
    #[serde(default)]
    pub metadata: Option<MetadataRecord>,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Self {
            kind: NodeKind::from_label(record.kind.as_deref()),
            id: record.id,
            x: record.x,
            y: record.y,
        }
    }
}

impl GraphDocument {
    /// Build the in-memory graph.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] when there are no nodes and
    /// [`GraphError::UnknownNode`] when an edge names an undeclared node.
    pub fn into_graph(self) -> Result<CampusGraph> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut graph = CampusGraph::new();
        for record in self.nodes {
            graph.add_node(record.into());
        }

        for (index, edge) in self.edges.iter().enumerate() {
            graph
                .add_edge(&edge.source, &edge.target, edge.weight)
                .map_err(|id| GraphError::UnknownNode { index, id })?;
        }

        let metadata = self.metadata.and_then(|meta| {
            Some(ImageMetadata {
                width: meta.image_width?,
                height: meta.image_height?,
            })
        });
        graph.set_metadata(metadata);

        Ok(graph)
    }
}

/// Parse a graph from JSON text
///
/// # Errors
/// Returns an error if the text is not a valid graph document or violates the
/// graph invariants (see [`GraphDocument::into_graph`]).
pub fn parse_graph_json(text: &str) -> Result<CampusGraph> {
    let document: GraphDocument = serde_json::from_str(text)?;
    document.into_graph()
}

/// Load a graph from a JSON file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<CampusGraph> {
    let content = fs::read_to_string(path)?;
    parse_graph_json(&content)
}
