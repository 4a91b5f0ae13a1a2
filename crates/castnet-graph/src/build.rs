//! Filtered co-occurrence graph construction.
//!
//! # Overview
//!
//! Takes the aggregated weighted edge list, drops every edge whose weight
//! is **not strictly greater** than the configured threshold, and builds an
//! undirected [`petgraph`] graph from the survivors. Nodes exist only
//! through surviving edges: a name whose every pair fell below the
//! threshold is absent from the graph and from all downstream tables.
//!
//! An empty graph is a valid, degenerate result: downstream metrics return
//! empty tables and the caller decides how loudly to report it.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{info, instrument};

use crate::edges::{EdgeList, WeightedEdge};

// ---------------------------------------------------------------------------
// CooccurrenceGraph
// ---------------------------------------------------------------------------

/// An undirected weighted graph of person names.
///
/// Nodes are names; an edge carries the number of documents in which both
/// endpoint names appear. Self-loops cannot occur; pairs are
/// distinct-name combinations by construction.
#[derive(Debug)]
pub struct CooccurrenceGraph {
    /// Undirected graph: nodes = names, edge weights = document counts.
    pub graph: UnGraph<String, u32>,
    /// Mapping from name to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// The threshold the edge list was filtered with.
    pub min_weight: u32,
}

impl CooccurrenceGraph {
    /// Build a graph from `edges`, keeping only `weight > min_weight`.
    ///
    /// Insertion order follows the edge list's deterministic order, so node
    /// indices are stable across runs on identical input.
    #[must_use]
    #[instrument(skip(edges), fields(candidate_edges = edges.len()))]
    pub fn from_edges(edges: &EdgeList, min_weight: u32) -> Self {
        let mut graph = UnGraph::<String, u32>::new_undirected();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for edge in edges.edges.iter().filter(|e| e.weight > min_weight) {
            let source = intern(&mut graph, &mut node_map, &edge.source);
            let target = intern(&mut graph, &mut node_map, &edge.target);
            // The edge list holds each unordered pair once, so no
            // duplicate-edge guard is needed here.
            graph.add_edge(source, target, edge.weight);
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            min_weight,
            "graph built"
        );

        Self {
            graph,
            node_map,
            min_weight,
        }
    }

    /// Return the number of names in the filtered graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of surviving edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when no edge survived the threshold.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for a name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Return the name label for a node.
    #[must_use]
    pub fn name(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// All names in the graph, sorted ascending.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.graph.node_weights().cloned().collect();
        names.sort();
        names
    }

    /// The surviving edges in deterministic (insertion) order.
    #[must_use]
    pub fn surviving_edges(&self) -> Vec<WeightedEdge> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                let weight = *self.graph.edge_weight(e)?;
                Some(WeightedEdge {
                    source: self.graph[a].clone(),
                    target: self.graph[b].clone(),
                    weight,
                })
            })
            .collect()
    }

    /// Summary statistics for logging and the run summary.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary::from_graph(self)
    }
}

fn intern(
    graph: &mut UnGraph<String, u32>,
    node_map: &mut HashMap<String, NodeIndex>,
    name: &str,
) -> NodeIndex {
    if let Some(idx) = node_map.get(name) {
        return *idx;
    }
    let idx = graph.add_node(name.to_string());
    node_map.insert(name.to_string(), idx);
    idx
}

// ---------------------------------------------------------------------------
// GraphSummary
// ---------------------------------------------------------------------------

/// Summary statistics for a filtered co-occurrence graph.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphSummary {
    /// Number of names (nodes) in the filtered graph.
    pub node_count: usize,
    /// Number of surviving edges.
    pub edge_count: usize,
    /// Undirected density: `2e / (n * (n - 1))`; zero below 2 nodes.
    pub density: f64,
    /// Sum of surviving edge weights.
    pub total_weight: u64,
    /// Heaviest surviving edge weight (zero for an empty graph).
    pub max_weight: u32,
}

impl GraphSummary {
    /// Compute statistics from a [`CooccurrenceGraph`].
    #[must_use]
    pub fn from_graph(g: &CooccurrenceGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let total_weight = g
            .graph
            .edge_weights()
            .map(|w| u64::from(*w))
            .sum::<u64>();
        let max_weight = g.graph.edge_weights().copied().max().unwrap_or(0);

        Self {
            node_count,
            edge_count,
            density: density(node_count, edge_count),
            total_weight,
            max_weight,
        }
    }
}

/// Undirected graph density. Zero for graphs with fewer than 2 nodes.
#[allow(clippy::cast_precision_loss)]
fn density(nodes: usize, edges: usize) -> f64 {
    if nodes < 2 {
        return 0.0;
    }
    (2 * edges) as f64 / (nodes * (nodes - 1)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::count_pairs;
    use std::collections::BTreeSet;

    fn name_set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    /// Canonical fixture: weights (A,B)=3, (A,C)=1, (B,C)=1.
    fn fixture() -> crate::edges::EdgeList {
        count_pairs(&[
            name_set(&["A", "B"]),
            name_set(&["A", "B", "C"]),
            name_set(&["A", "B"]),
        ])
    }

    #[test]
    fn threshold_zero_keeps_everything() {
        let g = CooccurrenceGraph::from_edges(&fixture(), 0);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // Weight-1 edges must drop at threshold 1; weight 3 survives.
        let g = CooccurrenceGraph::from_edges(&fixture(), 1);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.names(), vec!["A".to_string(), "B".to_string()]);

        // At threshold 3 even the (A, B) edge is gone.
        let g = CooccurrenceGraph::from_edges(&fixture(), 3);
        assert!(g.is_empty());
    }

    #[test]
    fn no_surviving_edge_has_weight_at_or_below_threshold() {
        let g = CooccurrenceGraph::from_edges(&fixture(), 1);
        assert!(g.surviving_edges().iter().all(|e| e.weight > 1));
    }

    #[test]
    fn nodes_exist_only_through_surviving_edges() {
        let g = CooccurrenceGraph::from_edges(&fixture(), 1);
        // C's only edges have weight 1; it must not appear as a node.
        assert!(g.node_index("C").is_none());
        assert!(g.node_index("A").is_some());
    }

    #[test]
    fn empty_graph_summary_is_all_zero() {
        let g = CooccurrenceGraph::from_edges(&fixture(), 100);
        let s = g.summary();
        assert_eq!(s.node_count, 0);
        assert_eq!(s.edge_count, 0);
        assert!((s.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(s.max_weight, 0);
    }

    #[test]
    fn triangle_density_is_one() {
        let g = CooccurrenceGraph::from_edges(&fixture(), 0);
        let s = g.summary();
        assert!((s.density - 1.0).abs() < 1e-12);
        assert_eq!(s.total_weight, 5);
        assert_eq!(s.max_weight, 3);
    }
}
