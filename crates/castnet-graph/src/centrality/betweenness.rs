//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a name lies on shortest paths between
//! other pairs of names. High-betweenness names are bridges between
//! otherwise separate clusters of the network.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted undirected graphs:
//!
//! 1. For each source `s`, BFS computes shortest-path counts and distances.
//! 2. Dependencies accumulate in reverse BFS order (farthest first).
//! 3. Scores sum across all sources.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! Scores are pair-normalized: the raw accumulation (which counts every
//! unordered pair from both endpoints) is scaled by `1 / ((n-1)(n-2))`,
//! so a node sitting on every shortest path between all other pairs
//! scores 1.0. Graphs with fewer than three nodes score 0.0 everywhere.

use std::collections::{HashMap, VecDeque};

use petgraph::{
    graph::NodeIndex,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use tracing::instrument;

use crate::build::CooccurrenceGraph;

/// Compute pair-normalized betweenness centrality for every name.
///
/// Disconnected nodes and nodes no shortest path passes through score 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn betweenness_centrality(g: &CooccurrenceGraph) -> HashMap<String, f64> {
    let graph = &g.graph;
    let n = graph.node_count();

    if n == 0 {
        return HashMap::new();
    }

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in graph.node_identifiers() {
        let si = graph.to_index(s);

        // Stack: nodes in order of discovery (farthest popped first).
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);

        // predecessors[w] = nodes immediately preceding w on shortest
        // paths from s.
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = graph.to_index(v);
            stack.push(v);

            for w in graph.neighbors(v) {
                let wi = graph.to_index(w);

                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = graph.to_index(w);

            for &v in &predecessors[wi] {
                let vi = graph.to_index(v);
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    // Each unordered pair was counted from both endpoints, so the pair
    // normalization folds the halving into a single 1/((n-1)(n-2)) scale.
    let scale = if n > 2 {
        1.0 / (((n - 1) * (n - 2)) as f64)
    } else {
        0.0
    };

    let mut result = HashMap::with_capacity(n);
    for idx in graph.node_identifiers() {
        let i = graph.to_index(idx);
        if let Some(name) = g.name(idx) {
            result.insert(name.to_string(), cb[i] * scale);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::CooccurrenceGraph;
    use crate::edges::count_pairs;
    use std::collections::BTreeSet;

    fn graph_from(docs: &[&[&str]]) -> CooccurrenceGraph {
        let sets: Vec<BTreeSet<String>> = docs
            .iter()
            .map(|names| names.iter().map(|s| (*s).to_string()).collect())
            .collect();
        CooccurrenceGraph::from_edges(&count_pairs(&sets), 0)
    }

    #[test]
    fn empty_graph_returns_empty() {
        let g = graph_from(&[]);
        assert!(betweenness_centrality(&g).is_empty());
    }

    #[test]
    fn two_nodes_score_zero() {
        let g = graph_from(&[&["A", "B"]]);
        let bc = betweenness_centrality(&g);
        assert!((bc["A"] - 0.0).abs() < 1e-12);
        assert!((bc["B"] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn path_middle_node_scores_one() {
        // A-B-C: every A↔C shortest path passes through B.
        let g = graph_from(&[&["A", "B"], &["B", "C"]]);
        let bc = betweenness_centrality(&g);

        assert!((bc["A"] - 0.0).abs() < 1e-10, "leaf A, got {}", bc["A"]);
        assert!((bc["B"] - 1.0).abs() < 1e-10, "bridge B, got {}", bc["B"]);
        assert!((bc["C"] - 0.0).abs() < 1e-10, "leaf C, got {}", bc["C"]);
    }

    #[test]
    fn path_of_four_interior_scores() {
        // A-B-C-D: B is on A↔C and A↔D, two of the three pairs not
        // involving B, so 2/3. Same for C by symmetry.
        let g = graph_from(&[&["A", "B"], &["B", "C"], &["C", "D"]]);
        let bc = betweenness_centrality(&g);

        assert!((bc["B"] - 2.0 / 3.0).abs() < 1e-10, "got {}", bc["B"]);
        assert!((bc["C"] - 2.0 / 3.0).abs() < 1e-10, "got {}", bc["C"]);
        assert!((bc["A"] - 0.0).abs() < 1e-10);
        assert!((bc["D"] - 0.0).abs() < 1e-10);
    }

    #[test]
    fn star_center_scores_one() {
        // Center H connects leaves A, B, C; every leaf pair routes
        // through H.
        let g = graph_from(&[&["H", "A"], &["H", "B"], &["H", "C"]]);
        let bc = betweenness_centrality(&g);

        assert!((bc["H"] - 1.0).abs() < 1e-10, "hub, got {}", bc["H"]);
        for leaf in ["A", "B", "C"] {
            assert!((bc[leaf] - 0.0).abs() < 1e-10, "leaf {leaf}");
        }
    }

    #[test]
    fn triangle_has_no_intermediaries() {
        let g = graph_from(&[&["A", "B", "C"]]);
        let bc = betweenness_centrality(&g);
        for name in ["A", "B", "C"] {
            assert!((bc[name] - 0.0).abs() < 1e-10, "{name} in a clique");
        }
    }

    #[test]
    fn disconnected_components_do_not_interact() {
        let g = graph_from(&[&["A", "B"], &["C", "D"]]);
        let bc = betweenness_centrality(&g);
        for name in ["A", "B", "C", "D"] {
            assert!((bc[name] - 0.0).abs() < 1e-10, "{name} in disjoint pairs");
        }
    }
}
