//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores a name by the scores of its neighbors:
//! connections to well-connected names are worth more than connections to
//! peripheral ones. It is the dominant eigenvector of the (unweighted)
//! adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration:
//!
//! 1. Initialize scores uniformly.
//! 2. For each node `v`: `score'(v) = sum of score(u)` over neighbors `u`.
//! 3. Normalize the score vector to unit L2 norm.
//! 4. Repeat until the change drops below `tolerance` or `max_iter` is hit.
//!
//! On a disconnected graph only the component carrying the dominant
//! eigenvalue keeps non-zero mass in the limit; smaller components decay
//! toward zero. That matches the underlying mathematics and is reported
//! as converged.

use std::collections::HashMap;

use petgraph::visit::{IntoNodeIdentifiers, NodeIndexable};
use tracing::instrument;

use crate::build::CooccurrenceGraph;

/// Default iteration cap for [`eigenvector_centrality`].
pub const DEFAULT_MAX_ITER: usize = 100;

/// Default convergence tolerance for [`eigenvector_centrality`].
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: name → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the iteration converged within `max_iter`.
    pub converged: bool,
}

/// Compute eigenvector centrality for every name in the graph.
///
/// # Arguments
///
/// * `g` — the filtered co-occurrence graph.
/// * `max_iter` — maximum number of power iterations.
/// * `tolerance` — stop when the L2 norm of the score change is below this.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn eigenvector_centrality(
    g: &CooccurrenceGraph,
    max_iter: usize,
    tolerance: f64,
) -> EigenvectorResult {
    let graph = &g.graph;
    let n = graph.node_count();

    if n == 0 {
        return EigenvectorResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    // Uniform start on the unit sphere.
    let init_val = 1.0 / (n as f64).sqrt();
    let mut scores: Vec<f64> = vec![init_val; n];

    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..max_iter {
        iterations = iter + 1;

        let mut new_scores = vec![0.0; n];

        for v in graph.node_identifiers() {
            let vi = graph.to_index(v);
            for u in graph.neighbors(v) {
                new_scores[vi] += scores[graph.to_index(u)];
            }
        }

        // Normalize to unit L2 norm.
        let norm: f64 = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut new_scores {
                *x /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();

        scores = new_scores;

        if diff < tolerance {
            converged = true;
            break;
        }
    }

    let mut result = HashMap::with_capacity(n);
    for idx in graph.node_identifiers() {
        let i = graph.to_index(idx);
        if let Some(name) = g.name(idx) {
            result.insert(name.to_string(), scores[i]);
        }
    }

    EigenvectorResult {
        scores: result,
        iterations,
        converged,
    }
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

    fn compute(g: &CooccurrenceGraph) -> EigenvectorResult {
        eigenvector_centrality(g, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE)
    }

    #[test]
    fn empty_graph_returns_empty_and_converged() {
        let g = graph_from(&[]);
        let result = compute(&g);
        assert!(result.scores.is_empty());
        assert!(result.converged);
    }

    #[test]
    fn triangle_scores_are_uniform() {
        let g = graph_from(&[&["A", "B", "C"]]);
        let result = compute(&g);
        assert!(result.converged);

        let expected = 1.0 / 3.0_f64.sqrt();
        for name in ["A", "B", "C"] {
            assert!(
                (result.scores[name] - expected).abs() < 1e-4,
                "{name}: got {}",
                result.scores[name]
            );
        }
    }

    #[test]
    fn path_center_outranks_leaves() {
        // A-B-C: dominant eigenvector is (1, √2, 1) / 2.
        let g = graph_from(&[&["A", "B"], &["B", "C"]]);
        let result = compute(&g);
        assert!(result.converged);

        assert!((result.scores["B"] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-4);
        assert!((result.scores["A"] - 0.5).abs() < 1e-4);
        assert!((result.scores["C"] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn scores_have_unit_l2_norm() {
        let g = graph_from(&[&["A", "B"], &["B", "C"], &["C", "D"], &["A", "D"]]);
        let result = compute(&g);

        let norm: f64 = result.scores.values().map(|s| s * s).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6, "norm {norm}");
    }

    #[test]
    fn covers_exactly_the_node_set() {
        let g = graph_from(&[&["A", "B", "C"], &["C", "D"]]);
        let result = compute(&g);
        assert_eq!(result.scores.len(), g.node_count());
    }

    #[test]
    fn zero_iterations_budget_reports_unconverged() {
        let g = graph_from(&[&["A", "B"], &["B", "C"]]);
        let result = eigenvector_centrality(&g, 0, DEFAULT_TOLERANCE);
        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
    }
}
