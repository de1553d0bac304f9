//! depgraph - dependency graph builder for installed npm/bower package trees
//!
//! This crate scans a project's installed packages, records each one as a
//! graph node keyed by name, resolves declared version ranges to installed
//! packages as aliases, and answers "what does X depend on" and
//! "what depends on X" queries.

pub mod export;
pub mod graph;
pub mod ingest;
pub mod parser;
pub mod scanner;
