//! The merged centrality table.
//!
//! # Overview
//!
//! Joins the three centrality score maps into one record per name. The
//! join is keyed by name with inner-join semantics, which is total by
//! construction: every metric is computed over the same node set, so no
//! record is ever dropped.
//!
//! # Ordering
//!
//! Each single-metric ranking sorts by its own score descending (the
//! original pipeline's sort key was undefined; sorting by the metric's own
//! value is the documented intent). The merged table orders by degree
//! centrality descending with name ascending as the tiebreak, so output is
//! deterministic for a given graph.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::build::CooccurrenceGraph;
use crate::centrality::{
    betweenness_centrality, degree_centrality, eigenvector_centrality,
    eigenvector::{DEFAULT_MAX_ITER, DEFAULT_TOLERANCE},
};

/// One row of the final table: a name and its three centrality scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRecord {
    #[serde(rename = "Name")]
    pub name: String,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub eigenvector_centrality: f64,
}

/// The merged centrality table for a filtered graph.
#[derive(Debug, Clone, Serialize)]
pub struct CentralityReport {
    /// Rows ordered by degree centrality descending, name ascending.
    pub records: Vec<CentralityRecord>,
    /// Whether the eigenvector iteration converged.
    pub eigenvector_converged: bool,
}

/// A single centrality metric, used to select rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Degree,
    Betweenness,
    Eigenvector,
}

impl CentralityReport {
    /// Compute all three metrics over `g` and merge them by name.
    ///
    /// An empty graph produces an empty (but well-formed) report.
    #[must_use]
    #[instrument(skip(g), fields(nodes = g.node_count()))]
    pub fn compute(g: &CooccurrenceGraph) -> Self {
        let degree = degree_centrality(g);
        let betweenness = betweenness_centrality(g);
        let eigenvector = eigenvector_centrality(g, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE);

        if !eigenvector.converged {
            warn!(
                iterations = eigenvector.iterations,
                "eigenvector centrality did not converge; scores are approximate"
            );
        }

        let mut records: Vec<CentralityRecord> = g
            .names()
            .into_iter()
            .map(|name| {
                let degree_score = degree.get(&name).copied().unwrap_or(0.0);
                let betweenness_score = betweenness.get(&name).copied().unwrap_or(0.0);
                let eigenvector_score = eigenvector.scores.get(&name).copied().unwrap_or(0.0);
                CentralityRecord {
                    name,
                    degree_centrality: degree_score,
                    betweenness_centrality: betweenness_score,
                    eigenvector_centrality: eigenvector_score,
                }
            })
            .collect();

        sort_records(&mut records, Metric::Degree);

        info!(rows = records.len(), "centrality report computed");

        Self {
            records,
            eigenvector_converged: eigenvector.converged,
        }
    }

    /// Rows re-ranked by one metric, score descending, name ascending.
    #[must_use]
    pub fn ranked_by(&self, metric: Metric) -> Vec<CentralityRecord> {
        let mut rows = self.records.clone();
        sort_records(&mut rows, metric);
        rows
    }

    /// Write the table as CSV to `sink`.
    ///
    /// Header: `Name,degree_centrality,betweenness_centrality,eigenvector_centrality`.
    /// An empty report still writes the header row.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the underlying write fails.
    pub fn write_csv(&self, sink: &mut dyn Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(sink);

        if self.records.is_empty() {
            // serde-derived headers are only emitted with a first record,
            // so write them explicitly for the degenerate table.
            writer.write_record([
                "Name",
                "degree_centrality",
                "betweenness_centrality",
                "eigenvector_centrality",
            ])?;
        }

        for record in &self.records {
            writer
                .serialize(record)
                .with_context(|| format!("serializing centrality row for {:?}", record.name))?;
        }

        writer.flush().context("flushing centrality CSV")?;
        Ok(())
    }

    /// Write the first `limit` rows as aligned text to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying write fails.
    pub fn write_preview(&self, sink: &mut dyn Write, limit: usize) -> Result<()> {
        writeln!(
            sink,
            "{:<30} {:>10} {:>13} {:>13}",
            "Name", "degree", "betweenness", "eigenvector"
        )?;

        for record in self.records.iter().take(limit) {
            writeln!(
                sink,
                "{:<30} {:>10.4} {:>13.4} {:>13.4}",
                record.name,
                record.degree_centrality,
                record.betweenness_centrality,
                record.eigenvector_centrality
            )?;
        }

        Ok(())
    }
}

/// Sort by the chosen metric descending; name ascending breaks ties.
fn sort_records(records: &mut [CentralityRecord], metric: Metric) {
    records.sort_by(|a, b| {
        let (x, y) = match metric {
            Metric::Degree => (a.degree_centrality, b.degree_centrality),
            Metric::Betweenness => (a.betweenness_centrality, b.betweenness_centrality),
            Metric::Eigenvector => (a.eigenvector_centrality, b.eigenvector_centrality),
        };
        y.total_cmp(&x).then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn report_covers_node_set_without_duplicates() {
        let g = graph_from(&[&["A", "B", "C"], &["C", "D"]]);
        let report = CentralityReport::compute(&g);

        assert_eq!(report.records.len(), g.node_count());
        let mut names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), g.node_count());
    }

    #[test]
    fn merged_table_orders_by_degree_desc_then_name() {
        // Star: H connects to A, B, C. H leads; leaves tie and sort by name.
        let g = graph_from(&[&["H", "A"], &["H", "B"], &["H", "C"]]);
        let report = CentralityReport::compute(&g);

        let order: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["H", "A", "B", "C"]);
    }

    #[test]
    fn rankings_sort_by_their_own_metric() {
        let g = graph_from(&[&["A", "B"], &["B", "C"], &["C", "D"]]);
        let report = CentralityReport::compute(&g);

        let by_betweenness = report.ranked_by(Metric::Betweenness);
        // Interior nodes B and C lead the betweenness ranking.
        assert_eq!(by_betweenness[0].name, "B");
        assert_eq!(by_betweenness[1].name, "C");

        let by_eigenvector = report.ranked_by(Metric::Eigenvector);
        assert!(
            by_eigenvector[0].eigenvector_centrality
                >= by_eigenvector[1].eigenvector_centrality
        );
    }

    #[test]
    fn csv_has_contract_header_and_one_row_per_node() {
        let g = graph_from(&[&["A", "B", "C"]]);
        let report = CentralityReport::compute(&g);

        let mut buf = Vec::new();
        report.write_csv(&mut buf).expect("write csv");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Name,degree_centrality,betweenness_centrality,eigenvector_centrality"
        );
        assert_eq!(lines.len(), 1 + 3);
    }

    #[test]
    fn empty_report_still_writes_header() {
        let g = graph_from(&[]);
        let report = CentralityReport::compute(&g);

        let mut buf = Vec::new();
        report.write_csv(&mut buf).expect("write csv");
        let text = String::from_utf8(buf).expect("utf8");

        assert_eq!(
            text.trim_end(),
            "Name,degree_centrality,betweenness_centrality,eigenvector_centrality"
        );
    }

    #[test]
    fn preview_truncates_to_limit() {
        let g = graph_from(&[&["A", "B"], &["B", "C"], &["C", "D"], &["D", "E"]]);
        let report = CentralityReport::compute(&g);

        let mut buf = Vec::new();
        report.write_preview(&mut buf, 2).expect("preview");
        let text = String::from_utf8(buf).expect("utf8");

        // Header plus two rows.
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn identical_graphs_yield_identical_reports() {
        let docs: &[&[&str]] = &[&["A", "B", "C"], &["A", "B"], &["B", "C"]];
        let first = CentralityReport::compute(&graph_from(docs));
        let second = CentralityReport::compute(&graph_from(docs));
        assert_eq!(first.records, second.records);
    }
}
