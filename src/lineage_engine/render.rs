//! Graph rendering for lineage results
//!
//! Emits Graphviz DOT (layout itself is Graphviz's job), a plain-text edge
//! listing, and a JSON edge array. Edge orientation follows the requested
//! traversal direction: upstream draws source -> target so flow points into
//! the seed, forward draws target -> source so the seed-adjacent endpoint
//! points toward the traversal.

use super::graph::LineageGraph;
use super::query::Direction;

/// Render the graph as Graphviz DOT, laid out left to right.
pub fn to_dot(graph: &LineageGraph, direction: Direction) -> String {
    let mut result = String::from("digraph lineage {\n");
    result.push_str("  rankdir=LR;\n");
    result.push_str("  node [shape=box, style=rounded];\n");

    for (from, to) in oriented_edges(graph, direction) {
        result.push_str(&format!("  \"{}\" -> \"{}\";\n", from, to));
    }

    result.push_str("}\n");
    result
}

/// Render the graph as a plain edge listing, one edge per line.
pub fn to_text(graph: &LineageGraph, direction: Direction) -> String {
    let mut result = String::new();
    for (from, to) in oriented_edges(graph, direction) {
        result.push_str(&format!("{} -> {}\n", from, to));
    }
    result
}

/// Serialize the deduplicated edge list as pretty-printed JSON.
pub fn to_json(graph: &LineageGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&graph.sorted_edges())
}

fn oriented_edges(graph: &LineageGraph, direction: Direction) -> Vec<(String, String)> {
    graph
        .sorted_edges()
        .into_iter()
        .map(|edge| match direction {
            Direction::Upstream => (edge.source, edge.target),
            Direction::Forward => (edge.target, edge.source),
        })
        .collect()
}
