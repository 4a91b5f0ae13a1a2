//! `cn analyze` — the full co-occurrence pipeline.
//!
//! Runs the six stages in order: load the labeled CSV, extract person
//! names per document, aggregate weighted co-occurrence edges, filter and
//! build the graph, render the visualization, compute and export the
//! centrality table. Strictly sequential; the first fatal error halts the
//! run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{info, instrument, warn};

use castnet_core::config::{PipelineConfig, load_config};
use castnet_core::dataset::load_documents;
use castnet_core::error::{CastnetError, ErrorCode};
use castnet_extract::{HeuristicExtractor, extract_all};
use castnet_graph::build::{CooccurrenceGraph, GraphSummary};
use castnet_graph::edges::{EdgeList, count_pairs};
use castnet_graph::render::{LayoutOptions, write_dot};
use castnet_graph::report::CentralityReport;

use crate::output::{OutputMode, render};

/// How many edge-list and table rows to echo to stdout.
const PREVIEW_ROWS: usize = 10;

/// Arguments for `cn analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input CSV file name, resolved relative to the data directory.
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Minimum edge weight (exclusive) for inclusion in the graph.
    #[arg(short = 'e', long = "edges")]
    pub edges: Option<u32>,

    /// Directory holding input CSV files.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for the centrality CSV table.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Directory for the network visualization.
    #[arg(long, value_name = "DIR")]
    pub viz_dir: Option<PathBuf>,

    /// Keep rows whose label column equals this value.
    #[arg(long)]
    pub label: Option<String>,

    /// Skip DOT and PNG rendering entirely.
    #[arg(long)]
    pub no_viz: bool,

    /// Seed for the randomized layout (reproducible DOT output).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Machine-readable summary of one pipeline run.
#[derive(Debug, Serialize)]
pub struct AnalyzeSummary {
    pub documents: usize,
    pub total_name_mentions: usize,
    pub distinct_pairs: usize,
    pub edge_hash: String,
    pub min_edge_weight: u32,
    pub graph: GraphSummary,
    pub eigenvector_converged: bool,
    pub table_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png_path: Option<PathBuf>,
}

/// Run the full pipeline.
///
/// # Errors
///
/// Returns a [`CastnetError`]-carrying failure for config, dataset, and
/// output problems. An empty filtered graph and a failed PNG render are
/// warnings, not errors.
#[instrument(skip_all)]
pub fn run_analyze(args: &AnalyzeArgs, mode: OutputMode, root: &Path) -> Result<()> {
    let config = resolve_config(args, root)?;

    // Stage 1: load the labeled corpus.
    let documents = load_documents(&config.input_path(), &config.dataset)?;

    // Stage 2: one extractor instance reused for every document.
    let extractor = HeuristicExtractor::new();
    let entity_sets = extract_all(&extractor, &documents);
    let total_name_mentions: usize = entity_sets.iter().map(std::collections::BTreeSet::len).sum();

    // Stage 3: weighted edge aggregation.
    let edge_list = count_pairs(&entity_sets);
    if !mode.is_json() {
        print_edge_preview(&edge_list)?;
    }

    // Stage 4: filter and build the graph.
    let min_weight = config.graph.min_edge_weight;
    let graph = CooccurrenceGraph::from_edges(&edge_list, min_weight);
    if graph.is_empty() {
        warn!(
            code = %ErrorCode::EmptyGraph,
            min_weight,
            "{}",
            ErrorCode::EmptyGraph.message()
        );
    }

    // Stage 5: visualization, side effect only.
    let (dot_path, png_path) = if args.no_viz {
        (None, None)
    } else {
        render_viz(&graph, &config)?
    };

    // Stage 6: centrality table.
    let report = CentralityReport::compute(&graph);
    let table_path = write_table(&report, &config)?;

    let summary = AnalyzeSummary {
        documents: documents.len(),
        total_name_mentions,
        distinct_pairs: edge_list.len(),
        edge_hash: edge_list.content_hash.clone(),
        min_edge_weight: min_weight,
        graph: graph.summary(),
        eigenvector_converged: report.eigenvector_converged,
        table_path,
        dot_path,
        png_path,
    };

    render(mode, &summary, |s, w| print_summary(&report, s, w))
}

/// Layer CLI flags over `castnet.toml` over built-in defaults.
fn resolve_config(args: &AnalyzeArgs, root: &Path) -> Result<PipelineConfig> {
    let mut config = load_config(root).map_err(|err| {
        CastnetError::new(ErrorCode::ConfigParseError, format!("{err:#}"))
    })?;

    if let Some(file) = &args.file {
        config.dataset.file.clone_from(file);
    }
    if let Some(label) = &args.label {
        config.dataset.label.clone_from(label);
    }
    if let Some(edges) = args.edges {
        config.graph.min_edge_weight = edges;
    }
    if let Some(dir) = &args.data_dir {
        config.paths.data_dir.clone_from(dir);
    }
    if let Some(dir) = &args.out_dir {
        config.paths.output_dir.clone_from(dir);
    }
    if let Some(dir) = &args.viz_dir {
        config.paths.viz_dir.clone_from(dir);
    }
    if args.seed.is_some() {
        config.layout.seed = args.seed;
    }

    // Relative paths resolve against the invocation directory.
    config.paths.data_dir = root.join(&config.paths.data_dir);
    config.paths.output_dir = root.join(&config.paths.output_dir);
    config.paths.viz_dir = root.join(&config.paths.viz_dir);

    Ok(config)
}

/// Echo the heaviest edges, mirroring the table preview.
fn print_edge_preview(edge_list: &EdgeList) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{:<25} {:<25} {:>7}", "nodeA", "nodeB", "weight")?;
    for edge in edge_list.edges.iter().take(PREVIEW_ROWS) {
        writeln!(out, "{:<25} {:<25} {:>7}", edge.source, edge.target, edge.weight)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Write the DOT file and best-effort rasterize it with Graphviz.
fn render_viz(
    graph: &CooccurrenceGraph,
    config: &PipelineConfig,
) -> Result<(Option<PathBuf>, Option<PathBuf>)> {
    fs::create_dir_all(&config.paths.viz_dir).map_err(|err| {
        CastnetError::new(
            ErrorCode::OutputWriteFailed,
            format!("{}: {err}", config.paths.viz_dir.display()),
        )
    })?;

    let dot_path = config.dot_path();
    let mut file = fs::File::create(&dot_path).map_err(|err| {
        CastnetError::new(
            ErrorCode::OutputWriteFailed,
            format!("{}: {err}", dot_path.display()),
        )
    })?;

    let options = LayoutOptions {
        canvas_size: config.layout.canvas_size,
        seed: config.layout.seed,
    };
    write_dot(graph, &mut file, &options)?;
    info!(path = %dot_path.display(), "visualization DOT written");

    // The PNG depends on an external Graphviz install; its absence must
    // never fail the numeric pipeline.
    let png_path = config.png_path();
    let rendered = Command::new("neato")
        .arg("-n2")
        .arg("-Tpng")
        .arg(&dot_path)
        .arg("-o")
        .arg(&png_path)
        .status();

    match rendered {
        Ok(status) if status.success() => {
            info!(path = %png_path.display(), "visualization PNG written");
            Ok((Some(dot_path), Some(png_path)))
        }
        Ok(status) => {
            warn!(
                code = %ErrorCode::VizRenderFailed,
                %status,
                "neato exited unsuccessfully; keeping DOT only"
            );
            Ok((Some(dot_path), None))
        }
        Err(err) => {
            warn!(
                code = %ErrorCode::VizRenderFailed,
                %err,
                "neato unavailable; keeping DOT only"
            );
            Ok((Some(dot_path), None))
        }
    }
}

/// Write the merged centrality table to the configured output path.
fn write_table(report: &CentralityReport, config: &PipelineConfig) -> Result<PathBuf> {
    fs::create_dir_all(&config.paths.output_dir).map_err(|err| {
        CastnetError::new(
            ErrorCode::OutputWriteFailed,
            format!("{}: {err}", config.paths.output_dir.display()),
        )
    })?;

    let table_path = config.table_path();
    let mut file = fs::File::create(&table_path).map_err(|err| {
        CastnetError::new(
            ErrorCode::OutputWriteFailed,
            format!("{}: {err}", table_path.display()),
        )
    })?;

    report
        .write_csv(&mut file)
        .with_context(|| format!("writing centrality table to {}", table_path.display()))?;

    info!(path = %table_path.display(), rows = report.records.len(), "centrality table written");
    Ok(table_path)
}

/// Human-mode run summary: table preview plus counts.
fn print_summary(
    report: &CentralityReport,
    summary: &AnalyzeSummary,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    report
        .write_preview(w, PREVIEW_ROWS)
        .map_err(std::io::Error::other)?;

    writeln!(w)?;
    writeln!(
        w,
        "{} documents, {} distinct pairs, {} nodes / {} edges above weight {}",
        summary.documents,
        summary.distinct_pairs,
        summary.graph.node_count,
        summary.graph.edge_count,
        summary.min_edge_weight
    )?;
    writeln!(w, "table: {}", summary.table_path.display())?;
    if let Some(png) = &summary.png_path {
        writeln!(w, "viz:   {}", png.display())?;
    } else if let Some(dot) = &summary.dot_path {
        writeln!(w, "viz:   {} (PNG skipped)", dot.display())?;
    }

    Ok(())
}
