//! Template-generated insight strings.
//!
//! Implemented as a rule table: each rule inspects the analysis context and
//! either produces one message or stays silent. Adding an insight means
//! adding a rule, not touching analyzer control flow.

use crate::analysis::paths::PathResult;
use crate::graph::{CompatibilityGraph, Node, NodeType, RelationType};

/// Minimum cumulative strength for the "strong bond" insight.
const STRONG_PATH_MIN: f64 = 2.0;
/// Maximum cumulative strength for the "tension" insight.
const TENSE_PATH_MAX: f64 = -1.0;
/// Minimum combined count for an element to be called dominant.
const DOMINANT_ELEMENT_MIN: f64 = 4.0;
/// Harmony index band edges for the overall-tone insight.
const HARMONY_HIGH: f64 = 0.7;
const HARMONY_LOW: f64 = 0.3;

/// Everything a rule may inspect.
pub(crate) struct InsightContext<'a> {
    pub graph: &'a CompatibilityGraph,
    pub strongest_paths: &'a [PathResult],
    pub weakest_paths: &'a [PathResult],
    pub cluster_score: f64,
    pub harmony_index: f64,
    pub critical_nodes: &'a [Node],
}

type InsightRule = fn(&InsightContext<'_>) -> Option<String>;

/// Rules fire in this fixed order; the output list order is part of the
/// deterministic contract.
const RULES: &[InsightRule] = &[
    overall_tone,
    strong_bond,
    tension_route,
    polarity_balance,
    dominant_element,
    cross_system_resonance,
    critical_hub,
];

/// Run every rule and collect the messages that fired. May be empty when no
/// pattern crosses its threshold.
pub(crate) fn generate(context: &InsightContext<'_>) -> Vec<String> {
    RULES.iter().filter_map(|rule| rule(context)).collect()
}

fn label_of<'a>(graph: &'a CompatibilityGraph, id: &'a str) -> &'a str {
    graph.node(id).map(|n| n.label.as_str()).unwrap_or(id)
}

/// Intermediate node labels of a path, endpoints dropped.
fn via_labels(graph: &CompatibilityGraph, path: &PathResult) -> Vec<String> {
    path.nodes[1..path.nodes.len().saturating_sub(1)]
        .iter()
        .map(|id| label_of(graph, id).to_string())
        .collect()
}

fn overall_tone(context: &InsightContext<'_>) -> Option<String> {
    if context.harmony_index >= HARMONY_HIGH {
        Some(format!(
            "The relationship leans strongly harmonious: {:.0}% of its relational energy is favorable.",
            context.harmony_index * 100.0
        ))
    } else if context.harmony_index <= HARMONY_LOW {
        Some(format!(
            "Friction dominates this pairing: only {:.0}% of its relational energy is favorable.",
            context.harmony_index * 100.0
        ))
    } else {
        None
    }
}

fn strong_bond(context: &InsightContext<'_>) -> Option<String> {
    let path = context.strongest_paths.first()?;
    if path.strength < STRONG_PATH_MIN {
        return None;
    }
    let via = via_labels(context.graph, path);
    if via.is_empty() {
        Some("The two charts connect directly and strongly.".to_string())
    } else {
        Some(format!(
            "The strongest connection between you flows through {}.",
            via.join(" and ")
        ))
    }
}

fn tension_route(context: &InsightContext<'_>) -> Option<String> {
    let path = context.weakest_paths.first()?;
    if path.strength > TENSE_PATH_MAX {
        return None;
    }
    let via = via_labels(context.graph, path);
    if via.is_empty() {
        Some("The main source of tension runs directly between your day masters.".to_string())
    } else {
        Some(format!(
            "Watch the route through {}: it carries the most tension.",
            via.join(" and ")
        ))
    }
}

fn polarity_balance(context: &InsightContext<'_>) -> Option<String> {
    context
        .graph
        .edges_of_type(RelationType::Complements)
        .next()
        .map(|_| {
            "Your yin and yang day masters are opposites, a natural balancing pair.".to_string()
        })
}

fn dominant_element(context: &InsightContext<'_>) -> Option<String> {
    // First element in generation-cycle order wins ties.
    let mut best: Option<&Node> = None;
    for node in context.graph.nodes_of_type(NodeType::Element) {
        let score = node.score.unwrap_or(0.0);
        if score > best.and_then(|n| n.score).unwrap_or(0.0) {
            best = Some(node);
        }
    }
    let node = best?;
    let total = node.score?;
    if total < DOMINANT_ELEMENT_MIN {
        return None;
    }
    Some(format!(
        "{} is the dominant element across both charts ({} characters combined).",
        node.label, total as u32
    ))
}

fn cross_system_resonance(context: &InsightContext<'_>) -> Option<String> {
    context
        .graph
        .edges_of_type(RelationType::Resonates)
        .next()
        .map(|_| {
            "Your Eastern and Western charts point to the same elemental core, a rare cross-system resonance.".to_string()
        })
}

fn critical_hub(context: &InsightContext<'_>) -> Option<String> {
    let node = context.critical_nodes.first()?;
    if node.node_type != NodeType::Element {
        return None;
    }
    Some(format!(
        "{} sits at the center of this relationship's dynamics.",
        node.label
    ))
}
