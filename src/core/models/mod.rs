//! Data models for `campus-graph`

pub mod graph;
pub mod node;

pub use graph::{CampusGraph, ImageMetadata};
pub use node::{Node, NodeKind};
