//! Eigenvector centrality: the principal eigenvector of the adjacency matrix.
//!
//! Graphs up to [`DENSE_LIMIT`] nodes are solved exactly with a dense
//! symmetric eigendecomposition. Larger graphs use Lanczos with full
//! reorthogonalization, restarted from the current Ritz vector until its
//! residual `|Ax - theta x|` drops to `tolerance * theta`.
//!
//! Scores have unit L2 length and a non-negative sum.

use nalgebra::DMatrix;
use ndarray::Array1;

use crate::centrality::{Centrality, CentralityScores};
use crate::error::{AnalysisError, Result};
use crate::graph::SocialGraph;

/// Largest graph solved with a dense eigendecomposition
pub const DENSE_LIMIT: usize = 1000;

/// Lanczos steps per restart
const KRYLOV_DIMENSION: usize = 128;

/// Relative size under which a new Lanczos direction counts as zero
const BREAKDOWN: f64 = 1e-10;

pub fn eigenvector_centrality(
    graph: &SocialGraph,
    max_restarts: usize,
    tolerance: f64,
) -> Result<CentralityScores> {
    let n = graph.node_count();
    if n == 0 {
        return Err(AnalysisError::EmptyGraph);
    }

    let vector = if graph.edge_count() == 0 {
        vec![1.0; n]
    } else if n <= DENSE_LIMIT {
        dense_principal(graph)
    } else {
        log::debug!("Eigenvector centrality over {} nodes via Lanczos", n);
        lanczos_principal(graph, KRYLOV_DIMENSION, max_restarts, tolerance)?
    };

    Ok(CentralityScores::new(Centrality::Eigenvector, normalize(vector)))
}

fn dense_principal(graph: &SocialGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut adjacency = DMatrix::<f64>::zeros(n, n);
    for (a, b) in graph.edges() {
        adjacency[(a.index(), b.index())] = 1.0;
        adjacency[(b.index(), a.index())] = 1.0;
    }

    let eigen = adjacency.symmetric_eigen();
    let top = largest(eigen.eigenvalues.iter());
    eigen.eigenvectors.column(top).iter().copied().collect()
}

/// Principal eigenvector by restarted Lanczos, `krylov` steps per restart
pub(crate) fn lanczos_principal(
    graph: &SocialGraph,
    krylov: usize,
    max_restarts: usize,
    tolerance: f64,
) -> Result<Vec<f64>> {
    let n = graph.node_count();
    let krylov = krylov.clamp(1, n);
    let edges: Vec<(usize, usize)> = graph.edges().map(|(a, b)| (a.index(), b.index())).collect();
    let mut start = Array1::from_elem(n, 1.0 / (n as f64).sqrt());

    for restart in 1..=max_restarts {
        let mut basis: Vec<Array1<f64>> = vec![start];
        let mut alphas: Vec<f64> = Vec::with_capacity(krylov);
        let mut betas: Vec<f64> = Vec::with_capacity(krylov);

        let last_beta = loop {
            let current = &basis[basis.len() - 1];
            let mut w = multiply(&edges, current);
            let scale = w.dot(&w).sqrt();
            alphas.push(w.dot(current));

            // twice, to hold orthogonality in floating point
            for _ in 0..2 {
                for v in &basis {
                    let overlap = w.dot(v);
                    w.scaled_add(-overlap, v);
                }
            }

            let beta = w.dot(&w).sqrt();
            if beta <= BREAKDOWN * scale.max(1.0) || basis.len() == krylov {
                break beta;
            }
            betas.push(beta);
            w /= beta;
            basis.push(w);
        };

        let k = alphas.len();
        let mut tridiagonal = DMatrix::<f64>::zeros(k, k);
        for (i, &alpha) in alphas.iter().enumerate() {
            tridiagonal[(i, i)] = alpha;
        }
        for (i, &beta) in betas.iter().enumerate() {
            tridiagonal[(i, i + 1)] = beta;
            tridiagonal[(i + 1, i)] = beta;
        }

        let eigen = tridiagonal.symmetric_eigen();
        let top = largest(eigen.eigenvalues.iter());
        let theta = eigen.eigenvalues[top];
        let weights = eigen.eigenvectors.column(top);

        let mut ritz = Array1::<f64>::zeros(n);
        for (v, &weight) in basis.iter().zip(weights.iter()) {
            ritz.scaled_add(weight, v);
        }

        let residual = last_beta * weights[k - 1].abs();
        if residual <= tolerance * theta.abs() {
            log::debug!("Lanczos converged after {} restarts (theta = {:.6})", restart, theta);
            return Ok(ritz.to_vec());
        }

        let norm = ritz.dot(&ritz).sqrt();
        start = ritz / norm;
    }

    Err(AnalysisError::EigenvectorNotConverged {
        restarts: max_restarts,
    })
}

fn multiply(edges: &[(usize, usize)], x: &Array1<f64>) -> Array1<f64> {
    let mut y = Array1::<f64>::zeros(x.len());
    for &(a, b) in edges {
        y[a] += x[b];
        y[b] += x[a];
    }
    y
}

/// Index of the largest value
fn largest<'a>(values: impl Iterator<Item = &'a f64>) -> usize {
    values
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(0, |(i, _)| i)
}

/// Unit L2 length, sign flipped so the entries sum to a non-negative value
fn normalize(mut vector: Vec<f64>) -> Vec<f64> {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        let sign = if vector.iter().sum::<f64>() < 0.0 { -1.0 } else { 1.0 };
        for v in &mut vector {
            *v *= sign / norm;
        }
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn path(n: u32) -> SocialGraph {
        SocialGraph::from_edges((1..n).map(|i| (i - 1, i)))
    }

    /// 60-ring with a hub wired to its first half
    fn lopsided_wheel() -> SocialGraph {
        let ring = (0..60).map(|i| (i.to_string(), ((i + 1) % 60).to_string()));
        let spokes = (0..30).map(|i| ("hub".to_string(), i.to_string()));
        SocialGraph::from_edges(ring.chain(spokes))
    }

    #[test]
    fn ring_is_uniform() {
        let graph = SocialGraph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]);
        let scores = eigenvector_centrality(&graph, 100, 1e-10).unwrap();
        for &value in scores.values() {
            assert_abs_diff_eq!(value, 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn star_center_dominates() {
        let graph = SocialGraph::from_edges([("c", "a"), ("c", "b"), ("c", "d"), ("c", "e")]);
        let scores = eigenvector_centrality(&graph, 100, 1e-10).unwrap();
        let center = scores.get(graph.node_index("c").unwrap());
        let leaf = scores.get(graph.node_index("a").unwrap());
        // principal eigenvector of K_{1,4}: center / leaf = sqrt(4)
        assert_abs_diff_eq!(center / leaf, 2.0, epsilon = 1e-9);
        let norm: f64 = scores.values().iter().map(|v| v * v).sum();
        assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn long_path_peaks_at_the_centre() {
        // x_i = sin(pi (i + 1) / 202), largest at i = 100
        let graph = path(201);
        let scores = eigenvector_centrality(&graph, 100, 1e-10).unwrap();
        assert_eq!(scores.ranked()[0].index(), 100);

        let norm = (0..201)
            .map(|i| (std::f64::consts::PI * (i + 1) as f64 / 202.0).sin().powi(2))
            .sum::<f64>()
            .sqrt();
        for (i, &value) in scores.values().iter().enumerate() {
            let expected = (std::f64::consts::PI * (i + 1) as f64 / 202.0).sin() / norm;
            assert_abs_diff_eq!(value, expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn disconnected_graph_concentrates_on_dominant_component() {
        // triangle (lambda = 2) and a lone edge (lambda = 1)
        let graph = SocialGraph::from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("x", "y")]);
        let scores = eigenvector_centrality(&graph, 100, 1e-10).unwrap();
        for label in ["a", "b", "c"] {
            assert_abs_diff_eq!(scores.get(graph.node_index(label).unwrap()), 1.0 / 3f64.sqrt(), epsilon = 1e-9);
        }
        for label in ["x", "y"] {
            assert_abs_diff_eq!(scores.get(graph.node_index(label).unwrap()), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn lanczos_matches_dense_solution() {
        let graph = lopsided_wheel();
        let dense = normalize(dense_principal(&graph));
        let restarted = normalize(lanczos_principal(&graph, 10, 500, 1e-10).unwrap());
        for (d, l) in dense.iter().zip(&restarted) {
            assert_abs_diff_eq!(d, l, epsilon = 1e-6);
        }

        // a full-length Krylov space is exact in one pass
        let graph = path(300);
        let dense = normalize(dense_principal(&graph));
        let single = normalize(lanczos_principal(&graph, 300, 1, 1e-8).unwrap());
        for (d, l) in dense.iter().zip(&single) {
            assert_abs_diff_eq!(d, l, epsilon = 1e-6);
        }
    }

    #[test]
    fn large_star_goes_through_lanczos() {
        let leaves = DENSE_LIMIT as u32 + 500;
        let graph = SocialGraph::from_edges((1..=leaves).map(|leaf| (0, leaf)));
        let scores = eigenvector_centrality(&graph, 100, 1e-10).unwrap();
        let center = scores.get(graph.node_index("0").unwrap());
        let leaf = scores.get(graph.node_index("1").unwrap());
        assert_abs_diff_eq!(center / leaf, (leaves as f64).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn reports_non_convergence_and_empty_graph() {
        assert!(matches!(
            lanczos_principal(&path(400), 4, 1, 1e-12),
            Err(AnalysisError::EigenvectorNotConverged { restarts: 1 })
        ));
        assert!(matches!(
            eigenvector_centrality(&SocialGraph::default(), 100, 1e-10),
            Err(AnalysisError::EmptyGraph)
        ));
    }
}
