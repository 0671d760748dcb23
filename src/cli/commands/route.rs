//! Route command handler

use super::{fail, input_path, load_input};
use campus_graph::config::Config;
use campus_graph::core::route::{find_route, no_route_message};
use campus_graph::{debug, info};
use std::path::Path;

/// Run the route command.
///
/// Prints the route, or "No path found" when the locations are not connected.
pub fn run(start: &str, end: &str, input_file: Option<&Path>, config: &Config) {
    let input = input_path(input_file, config);
    let graph = match load_input(&input) {
        Ok(graph) => graph,
        Err(message) => fail(&message),
    };

    match find_route(&graph, start, end) {
        Ok(Some(route)) => {
            debug!("Route {start} -> {end}: {} hops", route.path.len().saturating_sub(1));
            print!("{route}");
        }
        Ok(None) => {
            info!("No path between {start} and {end} in {}", input.display());
            println!("{}", no_route_message(start, end));
        }
        Err(e) => fail(&format!("✗ {e}")),
    }
}
