//! Node position resolution
//!
//! Stored image coordinates are used as-is when every node has them (with the
//! vertical axis inverted so the drawing matches the source image). Otherwise a
//! seeded Fruchterman-Reingold spring layout places the nodes.

use crate::core::models::CampusGraph;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// A position in layout space
pub type Point = (f64, f64);

/// Movement below this (per node, per iteration) ends the simulation early
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Closest two nodes are considered to be when computing forces
const MIN_DISTANCE: f64 = 0.01;

/// Which strategy produced a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSource {
    /// Stored `x`/`y` coordinates
    Coordinates,
    /// Force-directed fallback
    Spring,
}

/// Parameters of the spring layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Optimal distance between nodes
    pub k: f64,
    /// Number of simulation steps
    pub iterations: usize,
    /// RNG seed for the initial positions
    pub seed: u64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            k: 2.0,
            iterations: 50,
            seed: 42,
        }
    }
}

/// Resolved positions for every node, indexed like the graph's node indices
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    positions: Vec<Point>,
    source: LayoutSource,
}

impl Layout {
    /// Position of a node
    ///
    /// # Panics
    /// Panics if the index is outside the graph the layout was computed for.
    #[must_use]
    pub fn position(&self, idx: NodeIndex) -> Point {
        self.positions[idx.index()]
    }

    /// All positions in node index order
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Strategy that produced the positions
    #[must_use]
    pub const fn source(&self) -> LayoutSource {
        self.source
    }

    /// Bounding box as `(min, max)`, or `None` for an empty layout
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let (first, rest) = self.positions.split_first()?;
        Some(rest.iter().fold((*first, *first), |(min, max), &(x, y)| {
            ((min.0.min(x), min.1.min(y)), (max.0.max(x), max.1.max(y)))
        }))
    }
}

/// Pick and compute the layout for a graph
#[must_use]
pub fn resolve_layout(graph: &CampusGraph, params: &SpringParams) -> Layout {
    if graph.has_coordinates() {
        if let Some(positions) = coordinate_layout(graph) {
            return Layout {
                positions,
                source: LayoutSource::Coordinates,
            };
        }
    }
    Layout {
        positions: spring_layout(graph, params),
        source: LayoutSource::Spring,
    }
}

/// Positions `(x, -y)` taken from node coordinates, or `None` if any node lacks them
#[must_use]
pub fn coordinate_layout(graph: &CampusGraph) -> Option<Vec<Point>> {
    graph
        .nodes()
        .map(|(_, node)| node.coordinates().map(|(x, y)| (x, -y)))
        .collect()
}

/// Fruchterman-Reingold force-directed layout.
///
/// Edge weights scale the attractive force. Initial positions are uniform in
/// the unit square from an RNG seeded with `params.seed`; the temperature starts
/// at a tenth of the initial extent and cools linearly. The result is centred
/// on the origin and scaled so the largest coordinate magnitude is 1.
#[must_use]
pub fn spring_layout(graph: &CampusGraph, params: &SpringParams) -> Vec<Point> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.0, 0.0)],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut pos: Vec<Point> = (0..n).map(|_| (rng.gen::<f64>(), rng.gen::<f64>())).collect();

    let mut attraction = vec![0.0; n * n];
    for (a, b, weight) in graph.edges() {
        attraction[a.index() * n + b.index()] = weight;
        attraction[b.index() * n + a.index()] = weight;
    }

    let k = params.k;
    let mut temperature = extent(&pos) * 0.1;
    let cooling = temperature / (params.iterations as f64 + 1.0);

    for _ in 0..params.iterations {
        let mut displacement = vec![(0.0, 0.0); n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let distance = dx.hypot(dy).max(MIN_DISTANCE);
                let force =
                    k * k / (distance * distance) - attraction[i * n + j] * distance / k;
                displacement[i].0 += dx * force;
                displacement[i].1 += dy * force;
            }
        }

        let mut moved_sq = 0.0;
        for (p, (dx, dy)) in pos.iter_mut().zip(displacement) {
            let length = dx.hypot(dy);
            let length = if length < MIN_DISTANCE { 0.1 } else { length };
            let step = (dx * temperature / length, dy * temperature / length);
            p.0 += step.0;
            p.1 += step.1;
            moved_sq += step.0 * step.0 + step.1 * step.1;
        }

        temperature -= cooling;
        if moved_sq.sqrt() / (n as f64) < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    rescale(&mut pos);
    pos
}

fn extent(pos: &[Point]) -> f64 {
    let (min_x, max_x, min_y, max_y) = pos.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), &(x, y)| {
            (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
        },
    );
    (max_x - min_x).max(max_y - min_y)
}

/// Centre on the origin and scale into `[-1, 1]`
fn rescale(pos: &mut [Point]) {
    let n = pos.len() as f64;
    let (sum_x, sum_y) = pos
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let mut limit: f64 = 0.0;
    for p in pos.iter_mut() {
        p.0 -= mean_x;
        p.1 -= mean_y;
        limit = limit.max(p.0.abs()).max(p.1.abs());
    }

    if limit > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= limit;
            p.1 /= limit;
        }
    }
}
