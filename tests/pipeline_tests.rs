//! End-to-end tests over the sample graphs in `samples/`

use campus_graph::core::layout::{resolve_layout, LayoutSource, SpringParams};
use campus_graph::core::loader::load_graph;
use campus_graph::core::models::{CampusGraph, ImageMetadata, NodeKind};
use campus_graph::core::palette::{color_for, DEFAULT_COLOR};
use campus_graph::core::report::{reporter_for, GraphSummary, ReportFormat};
use campus_graph::core::route::find_route;
use campus_graph::core::stats::GraphStats;
use campus_graph::error::GraphError;
use campus_graph::get_version;
use std::path::PathBuf;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

fn sample(name: &str) -> CampusGraph {
    load_graph(sample_path(name)).expect("sample graph should load")
}

#[test]
fn version_is_not_empty() {
    assert!(!get_version().trim().is_empty());
}

#[test]
fn positioned_sample_uses_coordinates() {
    let graph = sample("campus_sample.json");
    assert_eq!(graph.node_count(), 14);
    assert_eq!(graph.edge_count(), 13);
    assert_eq!(
        graph.metadata(),
        Some(ImageMetadata {
            width: 800,
            height: 600
        })
    );

    let layout = resolve_layout(&graph, &SpringParams::default());
    assert_eq!(layout.source(), LayoutSource::Coordinates);

    let e1 = graph.index_of("E1").expect("E1");
    assert_eq!(layout.position(e1), (80.0, -420.0));
}

#[test]
fn unknown_type_gets_default_color() {
    let graph = sample("campus_sample.json");
    let kiosk = graph.get("K1").expect("K1");
    assert_eq!(kiosk.kind, NodeKind::Unknown);
    assert_eq!(color_for(kiosk.kind), DEFAULT_COLOR);
}

#[test]
fn positioned_sample_statistics() {
    let stats = GraphStats::compute(&sample("campus_sample.json")).expect("stats");

    assert!(stats.is_connected);
    assert!((stats.density - 26.0 / (14.0 * 13.0)).abs() < 1e-12);
    assert!((stats.average_degree - 26.0 / 14.0).abs() < 1e-12);
    let average = stats.average_shortest_path.expect("connected");
    assert!((average - 9223.0 / 182.0).abs() < 1e-9);
}

#[test]
fn sample_without_coordinates_falls_back_to_seeded_spring_layout() {
    let graph = sample("no_coords.json");
    assert_eq!(graph.get("R1").map(|n| n.kind), Some(NodeKind::Room));

    let params = SpringParams::default();
    let first = resolve_layout(&graph, &params);
    let second = resolve_layout(&graph, &params);

    assert_eq!(first.source(), LayoutSource::Spring);
    assert_eq!(first, second);
}

#[test]
fn disconnected_sample_omits_average_path_everywhere() {
    let graph = sample("disconnected.json");
    let summary = GraphSummary::new("disconnected.json", &graph).expect("summary");

    assert!(!summary.statistics.is_connected);
    assert_eq!(summary.statistics.average_shortest_path, None);

    for format in [ReportFormat::Text, ReportFormat::Json, ReportFormat::Markdown] {
        let report = reporter_for(format).render(&summary).expect("render");
        assert!(
            !report.to_lowercase().contains("average shortest path")
                && !report.contains("average_shortest_path"),
            "{format} report mentions the average path"
        );
    }
}

#[test]
fn route_resolves_door_variations() {
    let graph = sample("campus_sample.json");

    let route = find_route(&graph, "E1", "CP30")
        .expect("route")
        .expect("connected");
    assert_eq!(route.end, "CP30A");
    assert_eq!(route.path, vec!["E1", "H1", "CP30A"]);
    assert!((route.distance - 34.0).abs() < 1e-9);

    let route = find_route(&graph, "Q1", "P061")
        .expect("route")
        .expect("connected");
    assert!((route.distance - 97.0).abs() < 1e-9);
}

#[test]
fn route_to_unknown_location_fails() {
    let graph = sample("campus_sample.json");
    let err = find_route(&graph, "E1", "ZZZ").expect_err("unknown");
    assert!(matches!(err, GraphError::NodeNotFound(name) if name == "ZZZ"));
}

#[test]
fn route_between_components_is_none() {
    let graph = sample("disconnected.json");
    assert_eq!(find_route(&graph, "A", "C").expect("route"), None);
}
