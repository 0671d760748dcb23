//! Shortest routes between named campus locations
//!
//! Room doors are often modelled as separate nodes sharing a prefix (`CP30A`,
//! `CP30B`), so a query that matches no node exactly expands to every node
//! whose identifier extends the query by one or two characters. The shortest
//! route across all candidate pairs wins.

use crate::core::error::{GraphError, Result};
use crate::core::models::CampusGraph;
use crate::core::stats::check_path_weights;
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::fmt;

/// Longest suffix a door variation may add to the queried name
const MAX_VARIATION_SUFFIX: usize = 2;

/// A resolved shortest route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Start name as requested
    pub requested_start: String,
    /// End name as requested
    pub requested_end: String,
    /// Node the route actually starts from
    pub start: String,
    /// Node the route actually ends at
    pub end: String,
    /// Total weight along the route
    pub distance: f64,
    /// Node identifiers from start to end, inclusive
    pub path: Vec<String>,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Found ")?;
        writeln!(f, "From: {} (via {})", self.requested_start, self.start)?;
        writeln!(f, "To:   {} (via {})", self.requested_end, self.end)?;
        writeln!(f, "Distance: {}", self.distance)?;
        writeln!(f, "Path:")?;
        writeln!(f, "{}", self.path.join(" -> "))
    }
}

/// Message printed when both names resolve but no route connects them
#[must_use]
pub fn no_route_message(start: &str, end: &str) -> String {
    format!("No path found from '{start}' to '{end}'.")
}

/// Nodes a query name may refer to: the exact match if there is one, otherwise
/// every node whose identifier starts with `name` and is one or two characters longer.
#[must_use]
pub fn find_node_variations(graph: &CampusGraph, name: &str) -> Vec<NodeIndex> {
    if let Some(idx) = graph.index_of(name) {
        return vec![idx];
    }
    graph
        .nodes()
        .filter(|(_, node)| {
            node.id
                .strip_prefix(name)
                .is_some_and(|suffix| (1..=MAX_VARIATION_SUFFIX).contains(&suffix.chars().count()))
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Find the shortest route between two names.
///
/// Returns `Ok(None)` when both names resolve but no candidate pair is connected.
/// Among equally short routes the one using the later variations wins.
///
/// # Errors
/// Returns [`GraphError::NodeNotFound`] if either name matches no node, and
/// [`GraphError::InvalidWeight`] if any edge weight is negative or non-finite.
pub fn find_route(graph: &CampusGraph, start: &str, end: &str) -> Result<Option<Route>> {
    check_path_weights(graph)?;

    let starts = find_node_variations(graph, start);
    if starts.is_empty() {
        return Err(GraphError::NodeNotFound(start.to_string()));
    }
    let ends = find_node_variations(graph, end);
    if ends.is_empty() {
        return Err(GraphError::NodeNotFound(end.to_string()));
    }

    let inner = graph.inner();
    let mut best: Option<(f64, Vec<NodeIndex>)> = None;

    // Later variations are tried first and only a strictly shorter route
    // replaces the current best, so ties go to the last variation in node order.
    for &from in starts.iter().rev() {
        for &to in ends.iter().rev() {
            let Some((distance, path)) =
                astar(inner, from, |node| node == to, |edge| *edge.weight(), |_| 0.0)
            else {
                continue;
            };
            if best.as_ref().map_or(true, |(shortest, _)| distance < *shortest) {
                best = Some((distance, path));
            }
        }
    }

    Ok(best.map(|(distance, path)| {
        let ids: Vec<String> = path.iter().map(|&idx| graph.node(idx).id.clone()).collect();
        Route {
            requested_start: start.to_string(),
            requested_end: end.to_string(),
            start: ids.first().cloned().unwrap_or_default(),
            end: ids.last().cloned().unwrap_or_default(),
            distance,
            path: ids,
        }
    }))
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

    fn ids(graph: &CampusGraph, indices: &[NodeIndex]) -> Vec<String> {
        indices.iter().map(|&i| graph.node(i).id.clone()).collect()
    }

    #[test]
    fn exact_match_wins_over_variations() {
        let graph = graph_with(&["CP30", "CP30A", "CP30B"], &[]);
        let found = find_node_variations(&graph, "CP30");
        assert_eq!(ids(&graph, &found), vec!["CP30"]);
    }

    #[test]
    fn variations_extend_by_one_or_two_characters() {
        let graph = graph_with(&["CP30A", "CP30B2", "CP30ABC", "CP3", "XCP30A"], &[]);
        let found = find_node_variations(&graph, "CP30");
        assert_eq!(ids(&graph, &found), vec!["CP30A", "CP30B2"]);
    }

    #[test]
    fn shortest_route_across_door_variations() {
        // Two doors into room P061; the second one is closer.
        let graph = graph_with(
            &["E3", "H1", "H2", "P061A", "P061B"],
            &[
                ("E3", "H1", 5.0),
                ("H1", "P061A", 20.0),
                ("H1", "H2", 3.0),
                ("H2", "P061B", 4.0),
            ],
        );

        let route = find_route(&graph, "E3", "P061").expect("route").expect("path");
        assert_eq!(route.start, "E3");
        assert_eq!(route.end, "P061B");
        assert!((route.distance - 12.0).abs() < f64::EPSILON);
        assert_eq!(route.path, vec!["E3", "H1", "H2", "P061B"]);
    }

    #[test]
    fn equally_short_doors_resolve_to_the_later_variation() {
        let graph = graph_with(
            &["E3", "H1", "CP30A", "CP30B"],
            &[("E3", "H1", 5.0), ("H1", "CP30A", 2.0), ("H1", "CP30B", 2.0)],
        );

        let route = find_route(&graph, "E3", "CP30").expect("route").expect("path");
        assert_eq!(route.end, "CP30B");
        assert!((route.distance - 7.0).abs() < f64::EPSILON);

        let route = find_route(&graph, "CP30", "E3").expect("route").expect("path");
        assert_eq!(route.start, "CP30B");
    }

    #[test]
    fn routes_are_undirected() {
        let graph = graph_with(&["A", "B"], &[("A", "B", 2.5)]);
        let route = find_route(&graph, "B", "A").expect("route").expect("path");
        assert_eq!(route.path, vec!["B", "A"]);
    }

    #[test]
    fn unreachable_route_is_none() {
        let graph = graph_with(&["A", "B"], &[]);
        assert_eq!(find_route(&graph, "A", "B").expect("route"), None);
    }

    #[test]
    fn no_route_message_quotes_both_names() {
        assert_eq!(
            no_route_message("CP30", "P061"),
            "No path found from 'CP30' to 'P061'."
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        let graph = graph_with(&["A"], &[]);
        let err = find_route(&graph, "A", "Q").expect_err("unknown");
        assert!(matches!(err, GraphError::NodeNotFound(name) if name == "Q"));
    }

    #[test]
    fn route_display_lists_path() {
        let graph = graph_with(&["A", "B", "C"], &[("A", "B", 1.0), ("B", "C", 2.0)]);
        let route = find_route(&graph, "A", "C").expect("route").expect("path");
        let text = route.to_string();
        assert!(text.starts_with(" Found \nFrom: A (via A)\n"));
        assert!(text.contains("Distance: 3"));
        assert!(text.contains("A -> B -> C"));
    }
}
