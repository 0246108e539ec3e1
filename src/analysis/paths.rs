//! Bounded simple-path enumeration between the two person nodes.
//!
//! The graph is small (tens of nodes), so exhaustive DFS with a hop cap is
//! tractable. Edges are traversed undirected: most relations radiate outward
//! from the person nodes, so a directed walk would see almost no
//! person-to-person routes.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::edge_strength;
use crate::graph::CompatibilityGraph;

/// A scored route between the two person nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node ids along the path, endpoints included.
    pub nodes: Vec<String>,
    /// Cumulative signed strength of the traversed edges.
    pub strength: f64,
}

/// Undirected adjacency with parallel edges between a node pair merged into
/// one entry carrying their summed signed strength. BTreeMap keys keep
/// neighbor iteration order deterministic.
fn merged_adjacency(graph: &CompatibilityGraph) -> BTreeMap<&str, BTreeMap<&str, f64>> {
    let mut adjacency: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    for edge in &graph.edges {
        if edge.source == edge.target {
            continue;
        }
        let strength = edge_strength(edge);
        *adjacency
            .entry(edge.source.as_str())
            .or_default()
            .entry(edge.target.as_str())
            .or_insert(0.0) += strength;
        *adjacency
            .entry(edge.target.as_str())
            .or_default()
            .entry(edge.source.as_str())
            .or_insert(0.0) += strength;
    }
    adjacency
}

/// Enumerate every simple path from `from` to `to` within `max_hops` edges.
pub(crate) fn enumerate_paths(
    graph: &CompatibilityGraph,
    from: &str,
    to: &str,
    max_hops: usize,
) -> Vec<PathResult> {
    if graph.node(from).is_none() || graph.node(to).is_none() || from == to {
        return Vec::new();
    }
    let adjacency = merged_adjacency(graph);
    let mut results = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![from];
    visited.insert(from);
    walk(
        &adjacency,
        to,
        max_hops,
        &mut stack,
        &mut visited,
        0.0,
        &mut results,
    );
    results
}

fn walk<'a>(
    adjacency: &BTreeMap<&'a str, BTreeMap<&'a str, f64>>,
    to: &str,
    max_hops: usize,
    stack: &mut Vec<&'a str>,
    visited: &mut HashSet<&'a str>,
    strength: f64,
    results: &mut Vec<PathResult>,
) {
    if stack.len() > max_hops {
        return;
    }
    let current = *stack.last().unwrap_or(&"");
    let Some(neighbors) = adjacency.get(current) else {
        return;
    };
    for (&neighbor, &edge_sum) in neighbors {
        if neighbor == to {
            let mut nodes: Vec<String> = stack.iter().map(|s| s.to_string()).collect();
            nodes.push(to.to_string());
            results.push(PathResult {
                nodes,
                strength: strength + edge_sum,
            });
            continue;
        }
        if visited.contains(neighbor) {
            continue;
        }
        visited.insert(neighbor);
        stack.push(neighbor);
        walk(
            adjacency,
            to,
            max_hops,
            stack,
            visited,
            strength + edge_sum,
            results,
        );
        stack.pop();
        visited.remove(neighbor);
    }
}

/// Strongest-first ordering: higher strength, then fewer hops, then
/// lexicographic node sequence. Fully deterministic.
pub(crate) fn sort_strongest_first(paths: &mut [PathResult]) {
    paths.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.nodes.len().cmp(&b.nodes.len()))
            .then_with(|| a.nodes.cmp(&b.nodes))
    });
}

/// Weakest-first ordering: lower strength, then fewer hops, then
/// lexicographic node sequence.
pub(crate) fn sort_weakest_first(paths: &mut [PathResult]) {
    paths.sort_by(|a, b| {
        a.strength
            .partial_cmp(&b.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.nodes.len().cmp(&b.nodes.len()))
            .then_with(|| a.nodes.cmp(&b.nodes))
    });
}
