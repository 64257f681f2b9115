//! In-memory lineage graph built from warehouse edge rows

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

/// A single directed provenance relationship: `target` was derived from `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineageEdge {
    pub source: String,
    pub target: String,
}

impl LineageEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LineageEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A deduplicated set of lineage edges for one query, backed by a directed graph.
///
/// Constructed fresh per lineage request; nothing here is persisted. The
/// underlying log tables in the warehouse remain the source of truth.
#[derive(Debug, Default)]
pub struct LineageGraph {
    graph: DiGraph<String, ()>,
    node_indices: HashMap<String, NodeIndex>,
    seen_edges: HashSet<(String, String)>,
}

impl LineageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an edge list, dropping duplicates.
    pub fn from_edges(edges: impl IntoIterator<Item = LineageEdge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// Insert an edge. Returns false if the (source, target) pair was already present.
    pub fn add_edge(&mut self, edge: LineageEdge) -> bool {
        let key = (edge.source.clone(), edge.target.clone());
        if !self.seen_edges.insert(key) {
            return false;
        }

        let source_idx = self.node_index(&edge.source);
        let target_idx = self.node_index(&edge.target);
        self.graph.add_edge(source_idx, target_idx, ());
        true
    }

    fn node_index(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.node_indices.get(name) {
            return *idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.seen_edges
            .contains(&(source.to_string(), target.to_string()))
    }

    /// Edges in deterministic (source, target) order. The underlying set has
    /// no ordering guarantee, so renderers sort here.
    pub fn sorted_edges(&self) -> Vec<LineageEdge> {
        let mut edges: Vec<LineageEdge> = self
            .graph
            .edge_indices()
            .filter_map(|idx| self.graph.edge_endpoints(idx))
            .map(|(source, target)| {
                LineageEdge::new(self.graph[source].clone(), self.graph[target].clone())
            })
            .collect();
        edges.sort();
        edges
    }
}
