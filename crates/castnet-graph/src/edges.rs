//! Weighted co-occurrence edge aggregation.
//!
//! # Overview
//!
//! Each document contributes one unordered pair per 2-combination of its
//! person-name set. Pair order is normalized so `(A, B)` and `(B, A)` count
//! into the same bucket, and counts accumulate across documents into a
//! weighted edge list: the weight of `(A, B)` is the number of documents
//! mentioning both names.
//!
//! Aggregation runs in a `BTreeMap`, so the resulting edge list is fully
//! deterministic for a given input. A BLAKE3 hash of the sorted edge list
//! is exposed alongside it so identical runs are verifiable as identical
//! without diffing the whole list.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, instrument};

/// An unordered name pair with its cross-document co-occurrence count.
///
/// `source` always sorts lexicographically before `target`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WeightedEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// The aggregated edge list plus its content hash.
#[derive(Debug, Clone)]
pub struct EdgeList {
    /// Distinct pairs, ordered by weight descending then name ascending.
    pub edges: Vec<WeightedEdge>,
    /// BLAKE3 hash of the name-sorted edge list.
    pub content_hash: String,
}

impl EdgeList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Emit the unordered 2-combinations of one document's name set.
///
/// A set with fewer than two names yields nothing. A set of k names yields
/// exactly `k * (k - 1) / 2` pairs, each with `source < target`.
#[must_use]
pub fn document_pairs(names: &BTreeSet<String>) -> Vec<(String, String)> {
    let names: Vec<&String> = names.iter().collect();
    let mut pairs = Vec::with_capacity(names.len().saturating_sub(1) * names.len() / 2);

    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            // BTreeSet iteration is already sorted, so a < b holds.
            pairs.push(((*a).clone(), (*b).clone()));
        }
    }

    pairs
}

/// Aggregate per-document name sets into a weighted edge list.
///
/// Weight of a pair = number of documents whose name set contains both
/// names. Each distinct pair appears exactly once in the output.
#[must_use]
#[instrument(skip(documents), fields(documents = documents.len()))]
pub fn count_pairs(documents: &[BTreeSet<String>]) -> EdgeList {
    let mut counts: BTreeMap<(String, String), u32> = BTreeMap::new();

    for names in documents {
        for pair in document_pairs(names) {
            *counts.entry(pair).or_insert(0) += 1;
        }
    }

    let content_hash = hash_counts(&counts);

    let mut edges: Vec<WeightedEdge> = counts
        .into_iter()
        .map(|((source, target), weight)| WeightedEdge {
            source,
            target,
            weight,
        })
        .collect();

    // Heaviest pairs first; name order breaks ties deterministically.
    edges.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });

    info!(
        pairs = edges.len(),
        hash = %content_hash,
        "edge list aggregated"
    );

    EdgeList {
        edges,
        content_hash,
    }
}

/// BLAKE3 over the name-sorted `(source, target, weight)` triples.
fn hash_counts(counts: &BTreeMap<(String, String), u32>) -> String {
    let mut hasher = blake3::Hasher::new();

    for ((source, target), weight) in counts {
        hasher.update(source.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(target.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(&weight.to_le_bytes());
        hasher.update(b"\x1e");
    }

    format!("blake3:{}", hasher.finalize().to_hex())
}
