//! Core module: graph model, loading, layout, rendering and analysis

pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod models;
pub mod palette;
pub mod render;
pub mod report;
pub mod route;
pub mod stats;

/// Returns the current version of the `campus-graph` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
