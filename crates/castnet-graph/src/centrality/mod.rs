//! Centrality metrics for the co-occurrence graph.
//!
//! # Overview
//!
//! Each metric answers a different question about a name's position in the
//! filtered network:
//!
//! - **Degree centrality** (`degree`): How many of the possible
//!   connections does this name actually have?
//! - **Betweenness centrality** (`betweenness`): How often does this name
//!   bridge shortest paths between other pairs of names?
//! - **Eigenvector centrality** (`eigenvector`): How connected is this
//!   name to other well-connected names?
//!
//! All metrics operate on the undirected filtered graph, ignore edge
//! weights (weights only gate filtering), and return scores indexed by
//! name. Every metric covers exactly the graph's node set, so the merged
//! report's inner join over names is total.

pub mod betweenness;
pub mod degree;
pub mod eigenvector;

pub use betweenness::betweenness_centrality;
pub use degree::degree_centrality;
pub use eigenvector::{EigenvectorResult, eigenvector_centrality};
