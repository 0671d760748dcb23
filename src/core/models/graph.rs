//! Undirected weighted campus graph backed by `petgraph`

use super::node::Node;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pixel dimensions of the image the graph was traced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Image width in pixels
    pub width: u64,
    /// Image height in pixels
    pub height: u64,
}

/// A simple undirected graph of campus locations and weighted connections.
///
/// Nodes are addressed by their string identifier; the underlying `petgraph`
/// indices follow insertion order and are stable because nothing is removed.
#[derive(Debug, Clone)]
pub struct CampusGraph {
    graph: UnGraph<Node, f64>,
    index: HashMap<String, NodeIndex>,
    all_records_positioned: bool,
    metadata: Option<ImageMetadata>,
}

impl CampusGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            index: HashMap::new(),
            all_records_positioned: true,
            metadata: None,
        }
    }

    /// Add a node, replacing any earlier node with the same identifier.
    ///
    /// Every call counts towards [`has_coordinates`](Self::has_coordinates), so a
    /// repeated record without coordinates still disables the coordinate layout.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        self.all_records_positioned &= node.coordinates().is_some();
        if let Some(&idx) = self.index.get(&node.id) {
            self.graph[idx] = node;
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    /// Connect two existing nodes. A repeated pair keeps one edge with the latest weight.
    ///
    /// # Errors
    /// Returns the identifier that is not present in the graph.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> Result<EdgeIndex, String> {
        let from = self.index_of(a).ok_or_else(|| a.to_string())?;
        let to = self.index_of(b).ok_or_else(|| b.to_string())?;
        Ok(self.graph.update_edge(from, to, weight))
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges (self-loops count once)
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Index of the node with the given identifier
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Look up a node by identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Node at a `petgraph` index
    ///
    /// # Panics
    /// Panics if the index does not belong to this graph.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Edges as `(endpoint, endpoint, weight)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), *edge.weight()))
    }

    /// Degree of every node, indexed like the node indices. Self-loops add 2.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.graph.node_count()];
        for edge in self.graph.edge_references() {
            degrees[edge.source().index()] += 1;
            degrees[edge.target().index()] += 1;
        }
        degrees
    }

    /// Whether every node record carried both `x` and `y`
    #[must_use]
    pub const fn has_coordinates(&self) -> bool {
        self.all_records_positioned
    }

    /// Source image dimensions, if the input declared them
    #[must_use]
    pub const fn metadata(&self) -> Option<ImageMetadata> {
        self.metadata
    }

    /// Record the source image dimensions
    pub fn set_metadata(&mut self, metadata: Option<ImageMetadata>) {
        self.metadata = metadata;
    }

    /// Borrow the underlying `petgraph` graph
    #[must_use]
    pub const fn inner(&self) -> &UnGraph<Node, f64> {
        &self.graph
    }
}

impl Default for CampusGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CampusGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Campus graph ({} nodes, {} edges):",
            self.node_count(),
            self.edge_count()
        )?;
        writeln!(f)?;

        let mut ids: Vec<&str> = self.index.keys().map(String::as_str).collect();
        ids.sort_unstable();

        for id in ids {
            let Some(idx) = self.index_of(id) else {
                continue;
            };
            let mut neighbors: Vec<String> = self
                .graph
                .edges(idx)
                .map(|edge| {
                    let other = if edge.source() == idx {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    format!("{} ({})", self.graph[other].id, edge.weight())
                })
                .collect();
            neighbors.sort();
            if neighbors.is_empty() {
                writeln!(f, "  {id}: (isolated)")?;
            } else {
                writeln!(f, "  {id}: {}", neighbors.join(", "))?;
            }
        }

        Ok(())
    }
}
