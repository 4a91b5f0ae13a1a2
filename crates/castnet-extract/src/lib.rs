#![forbid(unsafe_code)]
//! castnet-extract library.
//!
//! Person-name entity extraction behind the [`person::PersonExtractor`]
//! trait. The default implementation is a deterministic heuristic; callers
//! that need exact, scriptable entity sets (tests, model-backed backends)
//! inject their own implementation.
//!
//! # Conventions
//!
//! - **Errors**: extraction is total; unparseable text yields an empty set.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod person;

pub use person::{HeuristicExtractor, PersonExtractor, extract_all};
