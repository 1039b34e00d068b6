//! Betweenness centrality (Brandes, 2001).
//!
//! One BFS per source counts shortest paths (sigma) and records
//! predecessors; a reverse sweep accumulates pair dependencies
//!
//! ```text
//! delta_s(v) = sum over w with v in P_s(w) of (sigma_sv / sigma_sw) * (1 + delta_s(w))
//! ```
//!
//! On an undirected graph every pair is seen from both ends. Normalized
//! scores divide those doubled sums by `(n-1)(n-2)`, which is the same as
//! dividing the single-counted sums by the number of pairs `(n-1)(n-2)/2`.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::centrality::{Centrality, CentralityScores, PARALLEL_THRESHOLD};
use crate::graph::SocialGraph;

/// Normalized betweenness centrality of every node, endpoints excluded
pub fn betweenness_centrality(graph: &SocialGraph) -> CentralityScores {
    let n = graph.node_count();
    let sources: Vec<NodeIndex> = graph.nodes().collect();

    let mut betweenness = if n < PARALLEL_THRESHOLD {
        let mut acc = vec![0.0_f64; n];
        for &source in &sources {
            accumulate_from(graph, source, &mut acc);
        }
        acc
    } else {
        log::debug!("Computing betweenness over {} sources in parallel", n);
        sources
            .par_iter()
            .fold(
                || vec![0.0_f64; n],
                |mut acc, &source| {
                    accumulate_from(graph, source, &mut acc);
                    acc
                },
            )
            .reduce(
                || vec![0.0_f64; n],
                |mut left, right| {
                    for (l, r) in left.iter_mut().zip(right) {
                        *l += r;
                    }
                    left
                },
            )
    };

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for b in &mut betweenness {
            *b *= scale;
        }
    }

    CentralityScores::new(Centrality::Betweenness, betweenness)
}

/// Single-source dependency accumulation
fn accumulate_from(graph: &SocialGraph, source: NodeIndex, betweenness: &mut [f64]) {
    let n = graph.node_count();
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);

    sigma[source.index()] = 1.0;
    dist[source.index()] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let v_dist = dist[v.index()];

        for w in graph.neighbors(v) {
            let w_idx = w.index();
            if dist[w_idx] < 0 {
                dist[w_idx] = v_dist + 1;
                queue.push_back(w);
            }
            if dist[w_idx] == v_dist + 1 {
                sigma[w_idx] += sigma[v.index()];
                predecessors[w_idx].push(v);
            }
        }
    }

    // Farthest nodes first
    let mut delta = vec![0.0_f64; n];
    for &w in order.iter().rev() {
        let w_idx = w.index();
        for &v in &predecessors[w_idx] {
            let v_idx = v.index();
            delta[v_idx] += sigma[v_idx] / sigma[w_idx] * (1.0 + delta[w_idx]);
        }
        if w != source {
            betweenness[w_idx] += delta[w_idx];
        }
    }
}
