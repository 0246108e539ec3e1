//! Compatibility graph model: typed nodes and edges over string ids.
//!
//! The graph is an arena of nodes keyed by stable string ids plus an edge
//! list referencing those ids. No language-level references cross the
//! structure, so it serializes and compares cheaply for determinism checks.

mod builder;

pub use builder::build;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Kind of a graph node (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Person,
    Element,
    Planet,
    Zodiac,
    Pillar,
    YinYang,
    Aspect,
}

/// Kind of a graph edge (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    HasElement,
    HasPlanet,
    HasZodiac,
    HasPillar,
    HasYinYang,
    Generates,
    Controls,
    Harmonizes,
    Conflicts,
    Complements,
    AspectsWith,
    Resonates,
}

impl RelationType {
    /// True for the purely structural person-to-attribute edges.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            RelationType::HasElement
                | RelationType::HasPlanet
                | RelationType::HasZodiac
                | RelationType::HasPillar
                | RelationType::HasYinYang
        )
    }
}

/// A value in a node's property bag. Only text and numbers occur; the key
/// set per node type is fixed by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl PropertyValue {
    /// Numeric value, if this property is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Text(_) => None,
        }
    }

    /// Text value, if this property is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Number(_) => None,
        }
    }
}

/// A node in the compatibility graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the graph, e.g. `person1`, `element_wood`.
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Small closed key set per node type (e.g. `total`, `person1Count`).
    /// BTreeMap keeps ordering deterministic.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// A directed edge between two node ids. Symmetric relations are emitted in
/// both directions by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relation: RelationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The full relational graph for one two-person assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl CompatibilityGraph {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All nodes of a given type, in insertion order.
    pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// All edges of a given relation, in insertion order.
    pub fn edges_of_type(&self, relation: RelationType) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.relation == relation)
    }

    /// True when every edge endpoint resolves to an existing node id and no
    /// node id repeats.
    pub fn is_well_formed(&self) -> bool {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return false;
            }
        }
        self.edges
            .iter()
            .all(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
    }
}
