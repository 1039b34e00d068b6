//! Closeness centrality with the Wasserman-Faust correction.
//!
//! For a node reaching `r` nodes (itself included) at total BFS distance `d`
//! in a graph of `n` nodes:
//!
//! ```text
//! C(u) = (r - 1) / d * (r - 1) / (n - 1)
//! ```
//!
//! The second factor scales down nodes sitting in small components, so
//! scores stay comparable on disconnected graphs.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::centrality::{Centrality, CentralityScores, PARALLEL_THRESHOLD};
use crate::graph::SocialGraph;

pub fn closeness_centrality(graph: &SocialGraph) -> CentralityScores {
    let n = graph.node_count();

    let values: Vec<f64> = if n < PARALLEL_THRESHOLD {
        graph.nodes().map(|node| closeness_of(graph, node)).collect()
    } else {
        log::debug!("Computing closeness over {} sources in parallel", n);
        let nodes: Vec<NodeIndex> = graph.nodes().collect();
        nodes.par_iter().map(|&node| closeness_of(graph, node)).collect()
    };

    CentralityScores::new(Centrality::Closeness, values)
}

fn closeness_of(graph: &SocialGraph, source: NodeIndex) -> f64 {
    let n = graph.node_count();
    if n <= 1 {
        return 0.0;
    }

    let (reachable, total) = bfs_distances(graph, source)
        .into_iter()
        .flatten()
        .fold((0usize, 0usize), |(count, sum), d| (count + 1, sum + d));

    if total == 0 {
        return 0.0;
    }

    let others = (reachable - 1) as f64;
    (others / total as f64) * (others / (n - 1) as f64)
}

/// Hop distance from `source` to every node, None when unreachable
fn bfs_distances(graph: &SocialGraph, source: NodeIndex) -> Vec<Option<usize>> {
    let mut dist = vec![None; graph.node_count()];
    dist[source.index()] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back((source, 0usize));

    while let Some((v, d)) = queue.pop_front() {
        for w in graph.neighbors(v) {
            if dist[w.index()].is_none() {
                dist[w.index()] = Some(d + 1);
                queue.push_back((w, d + 1));
            }
        }
    }

    dist
}
