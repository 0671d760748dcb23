//! Library for `campus-graph`
//! Loads campus map graphs, resolves node positions, renders PNG views and
//! computes graph statistics and shortest routes.

pub mod core;
pub mod logger;

pub use core::{config, error, get_version};
