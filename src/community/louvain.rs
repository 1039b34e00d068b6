//! Louvain community detection.
//!
//! Each level runs local moving until a pass makes no move or gains less
//! than [`MIN_IMPROVEMENT`] modularity, then collapses every community into
//! a single node (internal edges become a self-loop) and starts over on the
//! smaller weighted graph. Levels stop once modularity no longer improves.
//!
//! Node visiting order and the order candidate communities are tried in are
//! shuffled, so the partition depends on the seed.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::graph::SocialGraph;

/// Modularity gain below which a pass or a level counts as converged
pub const MIN_IMPROVEMENT: f64 = 1e-7;

/// Weighted graph for one Louvain level. Self-loop weights live in `loops`,
/// never in `adjacency`.
#[derive(Debug, Clone)]
struct LevelGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    loops: Vec<f64>,
}

impl LevelGraph {
    fn from_social(graph: &SocialGraph) -> Self {
        let adjacency = graph
            .nodes()
            .map(|node| graph.neighbors(node).map(|nbr| (nbr.index(), 1.0)).collect())
            .collect();

        Self {
            adjacency,
            loops: vec![0.0; graph.node_count()],
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Weighted degree; a self-loop counts twice
    fn degree(&self, node: usize) -> f64 {
        self.adjacency[node].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * self.loops[node]
    }

    fn total_weight(&self) -> f64 {
        let cross: f64 = self
            .adjacency
            .iter()
            .flat_map(|edges| edges.iter().map(|&(_, w)| w))
            .sum();
        cross / 2.0 + self.loops.iter().sum::<f64>()
    }

    /// Collapse each community of `partition` (ids 0..count) into one node
    fn aggregate(&self, partition: &[usize], count: usize) -> LevelGraph {
        let mut weights: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
        let mut loops = vec![0.0; count];

        for (node, edges) in self.adjacency.iter().enumerate() {
            let c1 = partition[node];
            loops[c1] += self.loops[node];

            for &(nbr, w) in edges {
                if nbr < node {
                    continue;
                }
                let c2 = partition[nbr];
                if c1 == c2 {
                    loops[c1] += w;
                } else {
                    *weights[c1].entry(c2).or_insert(0.0) += w;
                    *weights[c2].entry(c1).or_insert(0.0) += w;
                }
            }
        }

        LevelGraph {
            adjacency: weights.into_iter().map(|m| m.into_iter().collect()).collect(),
            loops,
        }
    }
}

/// Community bookkeeping for one level
struct Status {
    node2com: Vec<usize>,
    /// Total degree per community
    degrees: Vec<f64>,
    /// Degree per node
    gdegrees: Vec<f64>,
    /// Internal edge weight per community, each edge once
    internals: Vec<f64>,
    loops: Vec<f64>,
    total_weight: f64,
}

impl Status {
    fn new(graph: &LevelGraph) -> Self {
        let n = graph.node_count();
        let gdegrees: Vec<f64> = (0..n).map(|node| graph.degree(node)).collect();

        Self {
            node2com: (0..n).collect(),
            degrees: gdegrees.clone(),
            gdegrees,
            internals: graph.loops.clone(),
            loops: graph.loops.clone(),
            total_weight: graph.total_weight(),
        }
    }

    /// Modularity used for the stopping decisions. The resolution scales the
    /// internal term, `sum(resolution * L_c / m - (d_c / 2m)^2)`, which only
    /// matches [`modularity`] at resolution 1.
    fn modularity(&self, resolution: f64) -> f64 {
        let links = self.total_weight;
        if links == 0.0 {
            return 0.0;
        }

        self.internals
            .iter()
            .zip(&self.degrees)
            .map(|(&internal, &degree)| internal * resolution / links - (degree / (2.0 * links)).powi(2))
            .sum()
    }

    fn remove(&mut self, node: usize, com: usize, weight: f64) {
        self.degrees[com] -= self.gdegrees[node];
        self.internals[com] -= weight + self.loops[node];
    }

    fn insert(&mut self, node: usize, com: usize, weight: f64) {
        self.node2com[node] = com;
        self.degrees[com] += self.gdegrees[node];
        self.internals[com] += weight + self.loops[node];
    }
}

/// Edge weight from `node` into each neighboring community, in first-seen order
fn neighbor_communities(graph: &LevelGraph, node2com: &[usize], node: usize) -> Vec<(usize, f64)> {
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut weights: Vec<(usize, f64)> = Vec::new();

    for &(nbr, w) in &graph.adjacency[node] {
        let com = node2com[nbr];
        match position.get(&com) {
            Some(&pos) => weights[pos].1 += w,
            None => {
                position.insert(com, weights.len());
                weights.push((com, w));
            }
        }
    }

    weights
}

fn weight_to(neighbors: &[(usize, f64)], com: usize) -> f64 {
    neighbors
        .iter()
        .find(|&&(c, _)| c == com)
        .map_or(0.0, |&(_, w)| w)
}

/// Local moving phase. Returns true if any node changed community.
fn one_level(graph: &LevelGraph, status: &mut Status, resolution: f64, rng: &mut StdRng) -> bool {
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    let mut current = status.modularity(resolution);
    let mut moved_any = false;

    loop {
        let mut modified = false;
        order.shuffle(rng);

        for &node in &order {
            let com_node = status.node2com[node];
            let degc_totw = status.gdegrees[node] / (2.0 * status.total_weight);
            let mut neighbors = neighbor_communities(graph, &status.node2com, node);

            let own_weight = weight_to(&neighbors, com_node);
            let remove_cost = -own_weight
                + resolution * (status.degrees[com_node] - status.gdegrees[node]) * degc_totw;
            status.remove(node, com_node, own_weight);

            neighbors.shuffle(rng);
            let mut best_com = com_node;
            let mut best_increase = 0.0;
            for &(com, weight) in &neighbors {
                let increase = remove_cost + weight - resolution * status.degrees[com] * degc_totw;
                if increase > best_increase {
                    best_increase = increase;
                    best_com = com;
                }
            }

            status.insert(node, best_com, weight_to(&neighbors, best_com));
            if best_com != com_node {
                modified = true;
            }
        }

        moved_any |= modified;
        let new_modularity = status.modularity(resolution);
        if !modified || new_modularity - current < MIN_IMPROVEMENT {
            break;
        }
        current = new_modularity;
    }

    moved_any
}

/// Relabel community ids as 0..k in order of first appearance
fn renumber(node2com: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let partition = node2com
        .iter()
        .map(|&com| {
            let next = mapping.len();
            *mapping.entry(com).or_insert(next)
        })
        .collect();
    (partition, mapping.len())
}

/// Partition of `graph` maximizing modularity, as node index -> community id.
///
/// Ids run 0..k in order of first appearance over the graph's node order.
/// A graph without edges puts every node in its own community.
pub fn best_partition(graph: &SocialGraph, resolution: f64, seed: Option<u64>) -> Vec<usize> {
    let n = graph.node_count();
    if graph.edge_count() == 0 {
        return (0..n).collect();
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut level_graph = LevelGraph::from_social(graph);
    let mut assignment: Vec<usize> = (0..n).collect();
    let mut modularity: Option<f64> = None;
    let mut level = 0;

    loop {
        let mut status = Status::new(&level_graph);
        let moved = one_level(&level_graph, &mut status, resolution, &mut rng);
        let new_modularity = status.modularity(resolution);

        if let Some(previous) = modularity {
            if !moved || new_modularity - previous < MIN_IMPROVEMENT {
                break;
            }
        }

        let (partition, count) = renumber(&status.node2com);
        for com in assignment.iter_mut() {
            *com = partition[*com];
        }
        level += 1;
        log::debug!(
            "Louvain level {}: {} communities, modularity {:.6}",
            level,
            count,
            new_modularity
        );

        modularity = Some(new_modularity);
        level_graph = level_graph.aggregate(&partition, count);
    }

    renumber(&assignment).0
}

/// Modularity of an assignment over the unweighted graph,
/// `sum(L_c / m - resolution * (d_c / 2m)^2)` over communities `c`
pub fn modularity(graph: &SocialGraph, assignment: &[usize], resolution: f64) -> f64 {
    let links = graph.edge_count() as f64;
    if links == 0.0 {
        return 0.0;
    }

    let count = assignment.iter().max().map_or(0, |&max| max + 1);
    let mut internals = vec![0.0; count];
    let mut degrees = vec![0.0; count];

    for node in graph.nodes() {
        degrees[assignment[node.index()]] += graph.degree(node) as f64;
    }
    for (a, b) in graph.edges() {
        let com = assignment[a.index()];
        if com == assignment[b.index()] {
            internals[com] += 1.0;
        }
    }

    internals
        .iter()
        .zip(&degrees)
        .map(|(&internal, &degree)| internal / links - resolution * (degree / (2.0 * links)).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn two_triangles() -> SocialGraph {
        SocialGraph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)])
    }

    #[test]
    fn splits_disjoint_triangles() {
        for seed in 0..10 {
            let partition = best_partition(&two_triangles(), 1.0, Some(seed));
            assert_eq!(partition, vec![0, 0, 0, 1, 1, 1]);
        }
    }

    #[test]
    fn edgeless_graph_keeps_singletons() {
        let mut builder = crate::graph::GraphBuilder::new();
        for label in ["a", "b", "c"] {
            builder.get_or_create_node(label);
        }
        let graph = builder.build();
        assert_eq!(best_partition(&graph, 1.0, Some(1)), vec![0, 1, 2]);
    }

    #[test]
    fn same_seed_same_partition() {
        // Two 4-cliques joined by a single bridge
        let mut edges = Vec::new();
        for block in [0, 4] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push((block + i, block + j));
                }
            }
        }
        edges.push((3, 4));
        let graph = SocialGraph::from_edges(edges);

        let first = best_partition(&graph, 1.0, Some(7));
        let second = best_partition(&graph, 1.0, Some(7));
        assert_eq!(first, second);
        assert_eq!(first, vec![0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn modularity_of_triangles() {
        let graph = two_triangles();
        // each triangle: 3/6 - (6/12)^2 = 0.25
        assert_abs_diff_eq!(modularity(&graph, &[0, 0, 0, 1, 1, 1], 1.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(modularity(&graph, &[0, 0, 0, 0, 0, 0], 1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn resolution_scaling_differs_between_stopping_and_reported_modularity() {
        let graph = two_triangles();
        let assignment = [0, 0, 0, 1, 1, 1];

        let level = LevelGraph::from_social(&graph);
        let mut status = Status::new(&level);
        status.degrees = vec![0.0; 2];
        status.internals = vec![0.0; 2];
        for node in 0..level.node_count() {
            let neighbors = neighbor_communities(&level, &assignment, node);
            status.insert(node, assignment[node], weight_to(&neighbors, assignment[node]) / 2.0);
        }

        // per triangle: 2 * 3/6 - (6/12)^2 = 0.75
        assert_abs_diff_eq!(status.modularity(2.0), 1.5, epsilon = 1e-12);
        // per triangle: 3/6 - 2 * (6/12)^2 = 0
        assert_abs_diff_eq!(modularity(&graph, &assignment, 2.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(modularity(&graph, &assignment, 0.5), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(status.modularity(1.0), modularity(&graph, &assignment, 1.0), epsilon = 1e-12);
    }
}
