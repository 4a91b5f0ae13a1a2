//! Degree centrality: the fraction of possible connections a node has.

use std::collections::HashMap;

use petgraph::visit::IntoNodeIdentifiers;

use crate::build::CooccurrenceGraph;

/// Compute degree centrality for every name in the graph.
///
/// `score(v) = degree(v) / (n - 1)` where `n` is the node count. A name
/// connected to every other name scores 1.0. Graphs with fewer than two
/// nodes score 0.0 everywhere (there are no possible connections).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(g: &CooccurrenceGraph) -> HashMap<String, f64> {
    let n = g.node_count();
    let mut scores = HashMap::with_capacity(n);

    for idx in g.graph.node_identifiers() {
        let degree = g.graph.neighbors(idx).count();
        let score = if n < 2 {
            0.0
        } else {
            degree as f64 / (n - 1) as f64
        };

        if let Some(name) = g.name(idx) {
            scores.insert(name.to_string(), score);
        }
    }

    scores
}
