#![forbid(unsafe_code)]
//! castnet-core library.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types; fatal pipeline
//!   conditions carry an [`error::ErrorCode`] for machine-readable output.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod dataset;
pub mod error;
