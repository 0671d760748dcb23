//! Summary statistics for campus graphs

use crate::core::error::{GraphError, Result};
use crate::core::models::CampusGraph;
use petgraph::algo::{connected_components, dijkstra};
use petgraph::visit::EdgeRef;
use serde::Serialize;

/// Graph-level statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of nodes
    pub node_count: usize,
    /// Number of edges
    pub edge_count: usize,
    /// Edges divided by the maximum possible for a simple undirected graph
    pub density: f64,
    /// Whether every node is reachable from every other
    pub is_connected: bool,
    /// Mean weighted shortest path length over ordered node pairs; only for connected graphs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_shortest_path: Option<f64>,
    /// Mean node degree
    pub average_degree: f64,
}

impl GraphStats {
    /// Compute all statistics for a graph.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] for a graph without nodes, and
    /// [`GraphError::InvalidWeight`] when the graph is connected and an edge
    /// weight cannot serve as a path length.
    pub fn compute(graph: &CampusGraph) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(GraphError::EmptyGraph);
        }
        let is_connected = is_connected(graph);
        let average_shortest_path = if is_connected {
            Some(average_shortest_path_length(graph)?)
        } else {
            None
        };

        Ok(Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            density: density(graph),
            is_connected,
            average_shortest_path,
            average_degree: average_degree(graph),
        })
    }
}

/// `2m / (n (n - 1))`; zero for graphs with fewer than two nodes
#[must_use]
pub fn density(graph: &CampusGraph) -> f64 {
    let n = graph.node_count() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / (n * (n - 1.0))
}

/// Whether the graph forms exactly one connected component
#[must_use]
pub fn is_connected(graph: &CampusGraph) -> bool {
    connected_components(graph.inner()) == 1
}

/// Sum of degrees divided by node count; zero for an empty graph
#[must_use]
pub fn average_degree(graph: &CampusGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    graph.degrees().iter().sum::<usize>() as f64 / n as f64
}

/// Mean weighted shortest path distance between ordered pairs of distinct nodes.
///
/// Unreachable pairs are skipped, so callers should only rely on the value for
/// connected graphs. A single node yields zero.
///
/// # Errors
/// Returns [`GraphError::InvalidWeight`] for negative or non-finite weights.
pub fn average_shortest_path_length(graph: &CampusGraph) -> Result<f64> {
    check_path_weights(graph)?;

    let n = graph.node_count();
    if n <= 1 {
        return Ok(0.0);
    }

    let inner = graph.inner();
    let total: f64 = inner
        .node_indices()
        .map(|start| {
            dijkstra(inner, start, None, |edge| *edge.weight())
                .values()
                .sum::<f64>()
        })
        .sum();

    Ok(total / (n * (n - 1)) as f64)
}

/// Reject weights Dijkstra cannot handle.
///
/// # Errors
/// Returns [`GraphError::InvalidWeight`] naming the first offending edge.
pub fn check_path_weights(graph: &CampusGraph) -> Result<()> {
    match graph
        .edges()
        .find(|&(_, _, weight)| !weight.is_finite() || weight < 0.0)
    {
        Some((a, b, weight)) => Err(GraphError::InvalidWeight {
            from: graph.node(a).id.clone(),
            to: graph.node(b).id.clone(),
            weight,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Node, NodeKind};

    fn graph_with(ids: &[&str], edges: &[(&str, &str, f64)]) -> CampusGraph {
        let mut graph = CampusGraph::new();
        for id in ids {
            graph.add_node(Node::new((*id).to_string(), NodeKind::Room));
        }
        for (a, b, w) in edges {
            graph.add_edge(a, b, *w).expect("edge");
        }
        graph
    }

    #[test]
    fn complete_graph_has_density_one() {
        let graph = graph_with(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", 1.0),
                ("A", "C", 1.0),
                ("A", "D", 1.0),
                ("B", "C", 1.0),
                ("B", "D", 1.0),
                ("C", "D", 1.0),
            ],
        );
        let stats = GraphStats::compute(&graph).expect("stats");

        assert!((stats.density - 1.0).abs() < f64::EPSILON);
        assert!((stats.average_degree - 3.0).abs() < f64::EPSILON);
        assert!(stats.is_connected);
        assert_eq!(stats.average_shortest_path, Some(1.0));
    }

    #[test]
    fn path_graph_statistics() {
        // A -2- B -3- C
        let graph = graph_with(&["A", "B", "C"], &[("A", "B", 2.0), ("B", "C", 3.0)]);
        let stats = GraphStats::compute(&graph).expect("stats");

        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert!((stats.density - 2.0 / 3.0).abs() < 1e-12);
        assert!((stats.average_degree - 4.0 / 3.0).abs() < 1e-12);
        // Pair distances: AB=2, AC=5, BC=3, each counted in both directions.
        let expected = 2.0 * (2.0 + 5.0 + 3.0) / 6.0;
        assert!((stats.average_shortest_path.expect("connected") - expected).abs() < 1e-12);
    }

    #[test]
    fn shortest_path_prefers_lighter_detour() {
        let graph = graph_with(
            &["A", "B", "C"],
            &[("A", "C", 10.0), ("A", "B", 1.0), ("B", "C", 1.0)],
        );
        // AB=1, BC=1, AC=2 via B
        let avg = average_shortest_path_length(&graph).expect("avg");
        assert!((avg - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn disconnected_graph_omits_average_path() {
        let graph = graph_with(&["A", "B", "C", "D"], &[("A", "B", 1.0), ("C", "D", 1.0)]);
        let stats = GraphStats::compute(&graph).expect("stats");

        assert!(!stats.is_connected);
        assert_eq!(stats.average_shortest_path, None);
        assert!((stats.average_degree - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_node_is_connected_with_zero_path_length() {
        let graph = graph_with(&["A"], &[]);
        let stats = GraphStats::compute(&graph).expect("stats");

        assert!(stats.is_connected);
        assert_eq!(stats.average_shortest_path, Some(0.0));
        assert!(stats.density.abs() < f64::EPSILON);
        assert!(stats.average_degree.abs() < f64::EPSILON);
    }

    #[test]
    fn negative_weight_is_rejected_for_connected_graph() {
        let graph = graph_with(&["A", "B"], &[("A", "B", -1.0)]);
        let err = GraphStats::compute(&graph).expect_err("negative weight");
        assert!(matches!(err, GraphError::InvalidWeight { weight, .. } if weight < 0.0));
    }

    #[test]
    fn negative_weight_is_ignored_when_path_length_is_skipped() {
        let graph = graph_with(&["A", "B", "C"], &[("A", "B", -1.0)]);
        let stats = GraphStats::compute(&graph).expect("stats");
        assert_eq!(stats.average_shortest_path, None);
    }

    #[test]
    fn empty_graph_is_an_error() {
        let err = GraphStats::compute(&CampusGraph::new()).expect_err("empty");
        assert!(matches!(err, GraphError::EmptyGraph));
    }
}
