//! Fruchterman-Reingold spring layout

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::centrality::PARALLEL_THRESHOLD;
use crate::graph::SocialGraph;

/// Smallest distance used in force computations
const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Position every node, indexed by `NodeIndex`, inside [-1, 1] x [-1, 1].
///
/// Nodes start at uniform random positions drawn from `seed` and are pushed
/// apart by `k^2 / d` repulsion and pulled along edges by `d^2 / k`
/// attraction, with `k = 1/sqrt(n)` and a temperature that cools linearly
/// over `iterations` steps. Repulsion is all-pairs, split across rayon
/// workers on large graphs; attraction walks the edge list. The result is
/// centered and scaled so the farthest coordinate sits at 1.
pub fn spring_layout(graph: &SocialGraph, seed: Option<u64>, iterations: usize) -> Vec<Point> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![Point { x: 0.0, y: 0.0 }],
        _ => {}
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut positions: Vec<Point> = (0..n)
        .map(|_| Point { x: rng.gen::<f64>(), y: rng.gen::<f64>() })
        .collect();

    let edges: Vec<(usize, usize)> = graph.edges().map(|(a, b)| (a.index(), b.index())).collect();

    let k = (1.0 / n as f64).sqrt();
    let (width, height) = extent(&positions);
    let mut temperature = width.max(height) * 0.1;
    let cooling = temperature / (iterations + 1) as f64;

    for _ in 0..iterations {
        let mut displacement: Vec<Point> = if n < PARALLEL_THRESHOLD {
            (0..n).map(|i| repulsion(&positions, i, k)).collect()
        } else {
            (0..n).into_par_iter().map(|i| repulsion(&positions, i, k)).collect()
        };

        for &(a, b) in &edges {
            let dx = positions[a].x - positions[b].x;
            let dy = positions[a].y - positions[b].y;
            let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let force = distance / k;
            displacement[a].x -= dx * force;
            displacement[a].y -= dy * force;
            displacement[b].x += dx * force;
            displacement[b].y += dy * force;
        }

        for (position, shift) in positions.iter_mut().zip(&displacement) {
            let length = (shift.x * shift.x + shift.y * shift.y).sqrt().max(MIN_DISTANCE);
            position.x += shift.x * temperature / length;
            position.y += shift.y * temperature / length;
        }

        temperature -= cooling;
    }

    rescale(&mut positions);
    positions
}

/// Summed `k^2 / d` push on node `i` from every other node
fn repulsion(positions: &[Point], i: usize, k: f64) -> Point {
    let mut shift = Point { x: 0.0, y: 0.0 };
    for (j, other) in positions.iter().enumerate() {
        if i == j {
            continue;
        }
        let dx = positions[i].x - other.x;
        let dy = positions[i].y - other.y;
        let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
        let force = k * k / (distance * distance);
        shift.x += dx * force;
        shift.y += dy * force;
    }
    shift
}

fn extent(positions: &[Point]) -> (f64, f64) {
    let (min_x, max_x, min_y, max_y) = positions.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), p| (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y)),
    );
    (max_x - min_x, max_y - min_y)
}

/// Center on the mean and scale the largest absolute coordinate to 1
fn rescale(positions: &mut [Point]) {
    let n = positions.len() as f64;
    let mean_x = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = positions.iter().map(|p| p.y).sum::<f64>() / n;

    let mut limit: f64 = 0.0;
    for p in positions.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }

    if limit > 0.0 {
        for p in positions.iter_mut() {
            p.x /= limit;
            p.y /= limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_layout_is_reproducible_and_bounded() {
        let graph = SocialGraph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let first = spring_layout(&graph, Some(394), 50);
        let second = spring_layout(&graph, Some(394), 50);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        for p in &first {
            assert!(p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn trivial_graphs() {
        assert!(spring_layout(&SocialGraph::default(), Some(1), 50).is_empty());
        let mut builder = crate::graph::GraphBuilder::new();
        builder.get_or_create_node("solo");
        let graph = builder.build();
        assert_eq!(spring_layout(&graph, None, 50), vec![Point { x: 0.0, y: 0.0 }]);
    }

    #[test]
    fn lays_out_thousands_of_nodes() {
        let n = 3000;
        let graph = SocialGraph::from_edges((0..n).map(|i| (i, (i + 1) % n)));
        let positions = spring_layout(&graph, Some(394), 2);
        assert_eq!(positions.len(), n as usize);
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(positions.iter().all(|p| p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9));
    }
}
