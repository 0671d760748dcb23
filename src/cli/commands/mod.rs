//! CLI command handlers for `campusgraph`.
//!
//! Each command is implemented in its own submodule. Handlers report failures
//! as `✗`-prefixed messages on stderr and exit with status 1.

pub mod config;
pub mod render;
pub mod route;
pub mod stats;

use campus_graph::config::Config;
use campus_graph::core::loader::load_graph;
use campus_graph::core::models::CampusGraph;
use campus_graph::{debug, error, info};
use std::path::{Path, PathBuf};

/// Input file given on the command line, else the configured one
pub fn input_path(input_file: Option<&Path>, config: &Config) -> PathBuf {
    input_file.map_or_else(|| PathBuf::from(&config.paths.input), Path::to_path_buf)
}

/// Load a graph file, logging the outcome
///
/// # Errors
/// Returns a user-facing message if the file cannot be loaded.
pub fn load_input(path: &Path) -> Result<CampusGraph, String> {
    let graph = load_graph(path).map_err(|e| {
        error!("Failed to load graph {}: {e}", path.display());
        format!("✗ Failed to load {}: {e}", path.display())
    })?;
    info!(
        "Graph loaded: {} ({} nodes, {} edges)",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    debug!("{graph}");
    Ok(graph)
}

/// Print a failure message and exit with status 1
pub fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
