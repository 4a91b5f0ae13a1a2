//! Graphviz DOT rendering of the filtered network.
//!
//! # Overview
//!
//! Writes the co-occurrence graph as DOT with a randomized layout: each
//! node gets a pinned random position on a fixed-size square canvas, so
//! `neato -n2` rasterizes it without running its own layout pass. The
//! writer targets any `io::Write` sink, which keeps the numeric pipeline
//! testable without touching the filesystem or Graphviz.
//!
//! Rendering is a side effect only. Nothing downstream consumes it, and
//! layout randomness never reaches the CSV output; a fixed seed makes the
//! DOT text itself reproducible.

use std::io::Write;

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{info, instrument};

use crate::build::CooccurrenceGraph;

/// Layout parameters for [`write_dot`].
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Width and height of the square layout canvas, in points.
    pub canvas_size: u32,
    /// RNG seed for node placement. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            canvas_size: 1000,
            seed: None,
        }
    }
}

/// Write `g` as a DOT graph with randomized pinned node positions.
///
/// # Errors
///
/// Returns an error when the underlying write fails.
#[instrument(skip(g, sink), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn write_dot(g: &CooccurrenceGraph, sink: &mut dyn Write, options: &LayoutOptions) -> Result<()> {
    let mut rng = options
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    writeln!(sink, "graph castnet {{")?;
    writeln!(sink, "  graph [outputorder=edgesfirst, dpi=300];")?;
    writeln!(
        sink,
        "  node [shape=circle, width=0.2, fixedsize=true, fontsize=10, labelloc=b];"
    )?;
    writeln!(sink, "  edge [color=\"#99999966\"];")?;

    // Names sorted ascending so node statement order is deterministic;
    // only the coordinates vary with the seed.
    let size = f64::from(options.canvas_size);
    for name in g.names() {
        let x: f64 = rng.gen_range(0.0..size);
        let y: f64 = rng.gen_range(0.0..size);
        writeln!(
            sink,
            "  \"{}\" [pos=\"{x:.1},{y:.1}!\", xlabel=\"{}\"];",
            escape(&name),
            escape(&name)
        )?;
    }

    let max_weight = g.summary().max_weight.max(1);
    for edge in g.surviving_edges() {
        writeln!(
            sink,
            "  \"{}\" -- \"{}\" [weight={}, penwidth={:.2}];",
            escape(&edge.source),
            escape(&edge.target),
            edge.weight,
            penwidth(edge.weight, max_weight)
        )?;
    }

    writeln!(sink, "}}")?;
    sink.flush().context("flushing DOT output")?;

    info!("DOT written");
    Ok(())
}

/// Scale edge thickness by weight relative to the heaviest edge.
fn penwidth(weight: u32, max_weight: u32) -> f64 {
    1.0 + 3.0 * f64::from(weight) / f64::from(max_weight)
}

/// Escape a name for use inside a DOT double-quoted ID.
fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
