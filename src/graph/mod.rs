//! Graph module for dependency relationship modeling.
//!
//! This module provides the [`DependencyGraph`] struct for recording installed
//! packages, the version ranges that resolve to them, and the "depends on"
//! edges between them.
//!
//! # Example
//!
//! ```rust
//! use depgraph::graph::{DependencyGraph, DependencyMetadata};
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_real_dependency(&DependencyMetadata::new("react", "18.2.0"), ()).unwrap();
//! graph.add_real_dependency(&DependencyMetadata::new("react-dom", "18.2.0"), ()).unwrap();
//! graph.create_inter_dependency("react-dom", &DependencyMetadata::new("react", "^18.2.0")).unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod dependency_graph;
mod error;
mod metadata;
pub mod store;

pub use dependency_graph::{DependencyGraph, DependencyNode};
pub use error::{GraphError, GraphResult};
pub use metadata::DependencyMetadata;
