//! Render-ready encoding of a compatibility graph.
//!
//! Every node type and relation type maps to one fixed `#RRGGBB` color;
//! node sizes grow with score and edge widths with weight. The hex format
//! is a hard output contract for the downstream renderer.

use serde::{Deserialize, Serialize};

use crate::graph::{CompatibilityGraph, Edge, Node, NodeType, RelationType};

/// Size of an unscored node, unless its type overrides the baseline.
const NODE_BASE_SIZE: f64 = 12.0;
/// Person nodes anchor the diagram and render larger.
const PERSON_NODE_SIZE: f64 = 22.0;
/// Added per unit of node score.
const NODE_SIZE_PER_SCORE: f64 = 3.0;
/// Width of an unweighted edge.
const EDGE_BASE_WIDTH: f64 = 1.5;
/// Width at weight zero; widths grow linearly from here.
const EDGE_MIN_WIDTH: f64 = 1.0;
/// Added per unit of edge weight.
const EDGE_WIDTH_PER_WEIGHT: f64 = 2.0;

/// A display-ready node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Always `#RRGGBB`.
    pub color: String,
    pub size: f64,
}

/// A display-ready edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEdge {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Always `#RRGGBB`.
    pub color: String,
    pub width: f64,
}

/// The full payload handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationPayload {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

/// Fixed color per node type.
pub fn node_color(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Person => "#e17055",
        NodeType::Element => "#00b894",
        NodeType::Planet => "#fdcb6e",
        NodeType::Zodiac => "#a29bfe",
        NodeType::Pillar => "#636e72",
        NodeType::YinYang => "#2d3436",
        NodeType::Aspect => "#fd79a8",
    }
}

/// Fixed color per relation type. Favorable relations sit in the green and
/// gold families, unfavorable in reds, structural links in grays.
pub fn edge_color(relation: RelationType) -> &'static str {
    match relation {
        RelationType::Generates => "#2ecc71",
        RelationType::Harmonizes => "#27ae60",
        RelationType::Complements => "#9b59b6",
        RelationType::Resonates => "#f1c40f",
        RelationType::AspectsWith => "#e67e22",
        RelationType::Controls => "#e74c3c",
        RelationType::Conflicts => "#c0392b",
        RelationType::HasElement => "#95a5a6",
        RelationType::HasPlanet => "#b2bec3",
        RelationType::HasZodiac => "#dfe6e9",
        RelationType::HasPillar => "#7f8c8d",
        RelationType::HasYinYang => "#636e72",
    }
}

fn node_size(node: &Node) -> f64 {
    match node.score {
        Some(score) => NODE_BASE_SIZE + NODE_SIZE_PER_SCORE * score.max(0.0),
        None if node.node_type == NodeType::Person => PERSON_NODE_SIZE,
        None => NODE_BASE_SIZE,
    }
}

fn edge_width(edge: &Edge) -> f64 {
    match edge.weight {
        Some(weight) => EDGE_MIN_WIDTH + EDGE_WIDTH_PER_WEIGHT * weight.max(0.0),
        None => EDGE_BASE_WIDTH,
    }
}

/// Encode a graph for rendering. Total over any well-formed graph.
pub fn visualize(graph: &CompatibilityGraph) -> VisualizationPayload {
    let nodes = graph
        .nodes
        .iter()
        .map(|node| VisualNode {
            id: node.id.clone(),
            label: node.label.clone(),
            node_type: node.node_type,
            color: node_color(node.node_type).to_string(),
            size: node_size(node),
        })
        .collect();
    let edges = graph
        .edges
        .iter()
        .map(|edge| VisualEdge {
            source: edge.source.clone(),
            target: edge.target.clone(),
            label: edge.label.clone(),
            color: edge_color(edge.relation).to_string(),
            width: edge_width(edge),
        })
        .collect();
    VisualizationPayload { nodes, edges }
}
