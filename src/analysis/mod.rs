//! Graph analytics: signed edge strengths, path ranking, cluster score,
//! harmony index, critical nodes and insight strings.

mod insights;
mod paths;

pub use paths::PathResult;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::graph::{CompatibilityGraph, Edge, Node, RelationType};

/// Signed strength of a GENERATES edge at unit weight.
pub const GENERATES_STRENGTH: f64 = 1.0;
/// Signed strength of a HARMONIZES edge at unit weight.
pub const HARMONIZES_STRENGTH: f64 = 1.2;
/// Signed strength of a COMPLEMENTS edge at unit weight.
pub const COMPLEMENTS_STRENGTH: f64 = 1.0;
/// Signed strength of a RESONATES edge at unit weight.
pub const RESONATES_STRENGTH: f64 = 1.5;
/// Signed strength of an ASPECTS_WITH edge at unit weight (mildly favorable).
pub const ASPECTS_WITH_STRENGTH: f64 = 0.5;
/// Signed strength of a CONTROLS edge at unit weight.
pub const CONTROLS_STRENGTH: f64 = -0.8;
/// Signed strength of a CONFLICTS edge at unit weight.
pub const CONFLICTS_STRENGTH: f64 = -1.0;

/// Unit-weight signed strength per relation kind. Structural HAS_* edges
/// are neutral so that a graph with no signed relations reports the 0.5
/// midpoint harmony rather than a false positive.
pub fn base_strength(relation: RelationType) -> f64 {
    match relation {
        RelationType::Generates => GENERATES_STRENGTH,
        RelationType::Harmonizes => HARMONIZES_STRENGTH,
        RelationType::Complements => COMPLEMENTS_STRENGTH,
        RelationType::Resonates => RESONATES_STRENGTH,
        RelationType::AspectsWith => ASPECTS_WITH_STRENGTH,
        RelationType::Controls => CONTROLS_STRENGTH,
        RelationType::Conflicts => CONFLICTS_STRENGTH,
        RelationType::HasElement
        | RelationType::HasPlanet
        | RelationType::HasZodiac
        | RelationType::HasPillar
        | RelationType::HasYinYang => 0.0,
    }
}

/// Signed strength of one edge: relation constant scaled by the explicit
/// weight, unit weight when absent.
pub fn edge_strength(edge: &Edge) -> f64 {
    base_strength(edge.relation) * edge.weight.unwrap_or(1.0)
}

/// Analyzer tunables, loadable from `[engine]` in config.toml.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Maximum edges per person-to-person path.
    pub max_path_hops: usize,
    /// How many strongest/weakest paths to report.
    pub top_paths: usize,
    /// How many critical nodes to report.
    pub top_critical_nodes: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            max_path_hops: 4,
            top_paths: 3,
            top_critical_nodes: 5,
        }
    }
}

/// Full analysis output for one compatibility graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnalysis {
    pub strongest_paths: Vec<PathResult>,
    pub weakest_paths: Vec<PathResult>,
    /// Density of the favorable subgraph over active nodes, in [0,1].
    pub cluster_score: f64,
    /// Favorable share of total signed strength, in [0,1]; 0.5 when no
    /// signed edges exist.
    pub harmony_index: f64,
    pub critical_nodes: Vec<Node>,
    pub insights: Vec<String>,
}

/// Analyze a graph with default tuning.
pub fn analyze(graph: &CompatibilityGraph) -> GraphAnalysis {
    analyze_with(graph, &Tuning::default())
}

/// Analyze a graph with explicit tuning. Pure and total over any
/// well-formed graph, including the two-person edgeless degenerate case.
pub fn analyze_with(graph: &CompatibilityGraph, tuning: &Tuning) -> GraphAnalysis {
    let mut all_paths = paths::enumerate_paths(graph, "person1", "person2", tuning.max_path_hops);
    debug!("enumerated {} person-to-person paths", all_paths.len());

    paths::sort_strongest_first(&mut all_paths);
    let strongest_paths: Vec<PathResult> =
        all_paths.iter().take(tuning.top_paths).cloned().collect();
    paths::sort_weakest_first(&mut all_paths);
    let weakest_paths: Vec<PathResult> =
        all_paths.iter().take(tuning.top_paths).cloned().collect();

    let cluster_score = cluster_score(graph);
    let harmony_index = harmony_index(graph);
    let critical_nodes = critical_nodes(graph, tuning.top_critical_nodes);

    let insights = insights::generate(&insights::InsightContext {
        graph,
        strongest_paths: &strongest_paths,
        weakest_paths: &weakest_paths,
        cluster_score,
        harmony_index,
        critical_nodes: &critical_nodes,
    });

    GraphAnalysis {
        strongest_paths,
        weakest_paths,
        cluster_score,
        harmony_index,
        critical_nodes,
        insights,
    }
}

/// Nodes touched by at least one structural HAS_* edge. These are the nodes
/// either person actually "owns", as opposed to the universal element cycle.
fn active_nodes(graph: &CompatibilityGraph) -> HashSet<&str> {
    let mut active = HashSet::new();
    for edge in &graph.edges {
        if edge.relation.is_structural() {
            active.insert(edge.source.as_str());
            active.insert(edge.target.as_str());
        }
    }
    active
}

/// Ratio of node pairs connected by at least one favorable edge to all
/// possible pairs among active nodes, clamped to [0,1].
fn cluster_score(graph: &CompatibilityGraph) -> f64 {
    let active = active_nodes(graph);
    if active.len() < 2 {
        return 0.0;
    }
    let mut favorable_pairs: BTreeSet<(&str, &str)> = BTreeSet::new();
    for edge in &graph.edges {
        if edge_strength(edge) <= 0.0 {
            continue;
        }
        let (a, b) = (edge.source.as_str(), edge.target.as_str());
        if a == b || !active.contains(a) || !active.contains(b) {
            continue;
        }
        favorable_pairs.insert(if a < b { (a, b) } else { (b, a) });
    }
    let possible = active.len() * (active.len() - 1) / 2;
    (favorable_pairs.len() as f64 / possible as f64).clamp(0.0, 1.0)
}

/// Positive strength over total absolute strength; 0.5 midpoint when the
/// graph carries no signed edges at all.
fn harmony_index(graph: &CompatibilityGraph) -> f64 {
    let mut positive = 0.0;
    let mut negative = 0.0;
    for edge in &graph.edges {
        let strength = edge_strength(edge);
        if strength > 0.0 {
            positive += strength;
        } else {
            negative += -strength;
        }
    }
    let total = positive + negative;
    if total == 0.0 {
        return 0.5;
    }
    (positive / total).clamp(0.0, 1.0)
}

/// Top-N nodes by strength-weighted degree: the sum of |strength| over
/// incident edges. Favorable and unfavorable edges both count: a node
/// touching many high-magnitude edges drives the outcome either way.
fn critical_nodes(graph: &CompatibilityGraph, top_n: usize) -> Vec<Node> {
    let mut centrality: BTreeMap<&str, f64> = BTreeMap::new();
    for edge in &graph.edges {
        let magnitude = edge_strength(edge).abs();
        *centrality.entry(edge.source.as_str()).or_insert(0.0) += magnitude;
        *centrality.entry(edge.target.as_str()).or_insert(0.0) += magnitude;
    }
    let mut ranked: Vec<(&str, f64)> = centrality
        .into_iter()
        .filter(|(_, magnitude)| *magnitude > 0.0)
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked
        .into_iter()
        .take(top_n)
        .filter_map(|(id, _)| graph.node(id).cloned())
        .collect()
}
