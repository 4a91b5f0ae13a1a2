#![forbid(unsafe_code)]
//! castnet-graph library.
//!
//! Everything between entity sets and output files: unordered-pair edge
//! aggregation ([`edges`]), weighted graph construction and filtering
//! ([`build`]), centrality metrics ([`centrality`]), the merged centrality
//! table ([`report`]), and DOT rendering ([`render`]).
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod build;
pub mod centrality;
pub mod edges;
pub mod render;
pub mod report;
