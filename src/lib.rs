//! LineageFlow - a data lineage visualizer for warehouse lineage logs
//!
//! Builds recursive transitive-closure queries over the warehouse's lineage
//! log tables, executes them, and renders the resulting edge list as a
//! directed graph.

pub mod commands;
pub mod display;
pub mod lineage_engine;
pub mod validators;
