//! Graph construction from two (Saju, astrology) profile pairs.
//!
//! `build` is total and deterministic: the same inputs always produce the
//! same node/edge sets, and absent optional placements shrink the graph
//! instead of failing.

use std::collections::BTreeMap;

use log::debug;

use crate::graph::{CompatibilityGraph, Edge, Node, NodeType, PropertyValue, RelationType};
use crate::profile::{AstrologyProfile, Element, SajuProfile, TRACKED_PLANETS};

/// Default weight for relation edges that carry no input-derived scale.
const UNIT_WEIGHT: f64 = 1.0;

struct PersonInput<'a> {
    id: &'static str,
    label: &'static str,
    saju: &'a SajuProfile,
    astro: &'a AstrologyProfile,
}

fn element_id(element: Element) -> String {
    format!("element_{}", element.name())
}

fn planet_id(person: &PersonInput<'_>, planet: &str) -> String {
    format!("{}_{}", person.id, planet)
}

fn zodiac_id(sign: &str) -> String {
    format!("zodiac_{}", sign.to_lowercase())
}

fn yinyang_id(name: &str) -> String {
    format!("yinyang_{}", name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Build the compatibility graph for two people.
///
/// Implements the fixed construction order: person nodes, element nodes,
/// planet nodes, yin-yang nodes, pillar nodes, zodiac nodes, then the
/// universal element cycles and all person-derived edges.
pub fn build(
    person1_saju: &SajuProfile,
    person1_astro: &AstrologyProfile,
    person2_saju: &SajuProfile,
    person2_astro: &AstrologyProfile,
) -> CompatibilityGraph {
    let persons = [
        PersonInput {
            id: "person1",
            label: "Person 1",
            saju: person1_saju,
            astro: person1_astro,
        },
        PersonInput {
            id: "person2",
            label: "Person 2",
            saju: person2_saju,
            astro: person2_astro,
        },
    ];

    let mut graph = CompatibilityGraph::default();

    add_person_nodes(&mut graph, &persons);
    add_element_nodes(&mut graph, &persons);
    add_planet_nodes(&mut graph, &persons);
    add_yinyang_nodes(&mut graph, &persons);
    add_pillar_nodes(&mut graph, &persons);
    add_zodiac_nodes(&mut graph, &persons);

    add_element_cycle_edges(&mut graph);
    add_structural_edges(&mut graph, &persons);
    add_complement_edges(&mut graph, &persons);
    add_day_master_edges(&mut graph, &persons);
    add_aspect_edges(&mut graph, &persons);
    add_resonance_edges(&mut graph, &persons);

    debug!(
        "built compatibility graph: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}

fn add_person_nodes(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    for person in persons {
        let mut properties = BTreeMap::new();
        properties.insert(
            "dayMaster".to_string(),
            PropertyValue::from(person.saju.day_master.name.as_str()),
        );
        properties.insert(
            "element".to_string(),
            PropertyValue::from(person.saju.day_master.element.name()),
        );
        properties.insert(
            "sunSign".to_string(),
            PropertyValue::from(person.astro.sun.sign.as_str()),
        );
        graph.nodes.push(Node {
            id: person.id.to_string(),
            node_type: NodeType::Person,
            label: person.label.to_string(),
            score: None,
            properties,
        });
    }
}

fn add_element_nodes(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    for element in Element::ALL {
        let count1 = persons[0].saju.elements.get(element);
        let count2 = persons[1].saju.elements.get(element);
        let total = count1 + count2;
        let mut properties = BTreeMap::new();
        properties.insert("total".to_string(), PropertyValue::from(total));
        properties.insert("person1Count".to_string(), PropertyValue::from(count1));
        properties.insert("person2Count".to_string(), PropertyValue::from(count2));
        graph.nodes.push(Node {
            id: element_id(element),
            node_type: NodeType::Element,
            label: element.label().to_string(),
            score: Some(total as f64),
            properties,
        });
    }
}

fn add_planet_nodes(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    for person in persons {
        // Tracked planets, then the ascendant when the chart carries one.
        let mut points = person.astro.planets();
        if let Some(ref ascendant) = person.astro.ascendant {
            points.push(("ascendant", ascendant));
        }
        for (name, placement) in points {
            let mut properties = BTreeMap::new();
            properties.insert(
                "sign".to_string(),
                PropertyValue::from(placement.sign.as_str()),
            );
            properties.insert(
                "element".to_string(),
                PropertyValue::from(placement.element.name()),
            );
            graph.nodes.push(Node {
                id: planet_id(person, name),
                node_type: NodeType::Planet,
                label: format!("{} {}", person.label, capitalize(name)),
                score: None,
                properties,
            });
        }
    }
}

fn add_yinyang_nodes(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    // One node per distinct polarity present (1 or 2 nodes).
    for person in persons {
        let polarity = person.saju.day_master.yin_yang;
        let id = yinyang_id(polarity.name());
        if graph.node(&id).is_none() {
            graph.nodes.push(Node {
                id,
                node_type: NodeType::YinYang,
                label: polarity.label().to_string(),
                score: None,
                properties: BTreeMap::new(),
            });
        }
    }
}

fn add_pillar_nodes(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    for person in persons {
        for (slot, pillar) in person.saju.pillars.slots() {
            let mut properties = BTreeMap::new();
            properties.insert(
                "stem".to_string(),
                PropertyValue::from(pillar.stem.as_str()),
            );
            properties.insert(
                "branch".to_string(),
                PropertyValue::from(pillar.branch.as_str()),
            );
            graph.nodes.push(Node {
                id: format!("{}_pillar_{}", person.id, slot),
                node_type: NodeType::Pillar,
                label: format!("{} {} Pillar", person.label, capitalize(slot)),
                score: None,
                properties,
            });
        }
    }
}

fn add_zodiac_nodes(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    // One node per distinct sun sign; shared signs collapse into one node.
    for person in persons {
        let sun = &person.astro.sun;
        let id = zodiac_id(&sun.sign);
        if graph.node(&id).is_none() {
            let mut properties = BTreeMap::new();
            properties.insert(
                "element".to_string(),
                PropertyValue::from(sun.element.name()),
            );
            graph.nodes.push(Node {
                id,
                node_type: NodeType::Zodiac,
                label: sun.sign.clone(),
                score: None,
                properties,
            });
        }
    }
}

/// The universal generation/control cycles: exactly 5 GENERATES and 5
/// CONTROLS edges, present in every graph regardless of input.
fn add_element_cycle_edges(graph: &mut CompatibilityGraph) {
    for element in Element::ALL {
        graph.edges.push(Edge {
            source: element_id(element),
            target: element_id(element.generates()),
            relation: RelationType::Generates,
            weight: Some(UNIT_WEIGHT),
            label: Some("generates".to_string()),
        });
    }
    for element in Element::ALL {
        graph.edges.push(Edge {
            source: element_id(element),
            target: element_id(element.controls()),
            relation: RelationType::Controls,
            weight: Some(UNIT_WEIGHT),
            label: Some("controls".to_string()),
        });
    }
}

fn add_structural_edges(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    for person in persons {
        // HAS_ELEMENT weighted by the element's share of this person's total.
        let total = person.saju.elements.total();
        for element in Element::ALL {
            let count = person.saju.elements.get(element);
            if count == 0 || total == 0 {
                continue;
            }
            graph.edges.push(Edge {
                source: person.id.to_string(),
                target: element_id(element),
                relation: RelationType::HasElement,
                weight: Some(count as f64 / total as f64),
                label: None,
            });
        }

        let mut points: Vec<&str> = person.astro.planets().iter().map(|(n, _)| *n).collect();
        if person.astro.ascendant.is_some() {
            points.push("ascendant");
        }
        for name in points {
            graph.edges.push(Edge {
                source: person.id.to_string(),
                target: planet_id(person, name),
                relation: RelationType::HasPlanet,
                weight: None,
                label: None,
            });
        }

        graph.edges.push(Edge {
            source: person.id.to_string(),
            target: zodiac_id(&person.astro.sun.sign),
            relation: RelationType::HasZodiac,
            weight: None,
            label: None,
        });

        for (slot, _) in person.saju.pillars.slots() {
            graph.edges.push(Edge {
                source: person.id.to_string(),
                target: format!("{}_pillar_{}", person.id, slot),
                relation: RelationType::HasPillar,
                weight: None,
                label: None,
            });
        }

        graph.edges.push(Edge {
            source: person.id.to_string(),
            target: yinyang_id(person.saju.day_master.yin_yang.name()),
            relation: RelationType::HasYinYang,
            weight: None,
            label: None,
        });
    }
}

/// COMPLEMENTS between the two polarity nodes when the day masters are
/// opposite; emitted in both directions since the relation is symmetric.
fn add_complement_edges(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    let polarity1 = persons[0].saju.day_master.yin_yang;
    let polarity2 = persons[1].saju.day_master.yin_yang;
    if polarity1 == polarity2 {
        return;
    }
    for (from, to) in [(polarity1, polarity2), (polarity2, polarity1)] {
        graph.edges.push(Edge {
            source: yinyang_id(from.name()),
            target: yinyang_id(to.name()),
            relation: RelationType::Complements,
            weight: Some(UNIT_WEIGHT),
            label: Some("opposite polarity".to_string()),
        });
    }
}

/// HARMONIZES / CONFLICTS between the two person nodes from the
/// generate/control relation of their day-master elements.
fn add_day_master_edges(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    let dm1 = persons[0].saju.day_master.element;
    let dm2 = persons[1].saju.day_master.element;

    if dm1 == dm2 {
        // Matching day masters support each other.
        for (from, to) in [("person1", "person2"), ("person2", "person1")] {
            graph.edges.push(Edge {
                source: from.to_string(),
                target: to.to_string(),
                relation: RelationType::Harmonizes,
                weight: Some(UNIT_WEIGHT),
                label: Some(format!("matching {} day masters", dm1.name())),
            });
        }
        return;
    }

    for (from, to) in [(0usize, 1usize), (1, 0)] {
        let from_element = persons[from].saju.day_master.element;
        let to_element = persons[to].saju.day_master.element;
        if from_element.generates() == to_element {
            graph.edges.push(Edge {
                source: persons[from].id.to_string(),
                target: persons[to].id.to_string(),
                relation: RelationType::Harmonizes,
                weight: Some(UNIT_WEIGHT),
                label: Some(format!(
                    "{} nourishes {}",
                    from_element.name(),
                    to_element.name()
                )),
            });
        }
        if from_element.controls() == to_element {
            graph.edges.push(Edge {
                source: persons[from].id.to_string(),
                target: persons[to].id.to_string(),
                relation: RelationType::Conflicts,
                weight: Some(UNIT_WEIGHT),
                label: Some(format!(
                    "{} restrains {}",
                    from_element.name(),
                    to_element.name()
                )),
            });
        }
    }
}

/// ASPECTS_WITH between the same tracked planet of both persons when the
/// two placements share an element.
fn add_aspect_edges(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    for name in TRACKED_PLANETS {
        let (Some(placement1), Some(placement2)) = (
            persons[0].astro.planet(name),
            persons[1].astro.planet(name),
        ) else {
            continue;
        };
        if placement1.element != placement2.element {
            continue;
        }
        let id1 = planet_id(&persons[0], name);
        let id2 = planet_id(&persons[1], name);
        for (from, to) in [(&id1, &id2), (&id2, &id1)] {
            graph.edges.push(Edge {
                source: from.clone(),
                target: to.clone(),
                relation: RelationType::AspectsWith,
                weight: Some(UNIT_WEIGHT),
                label: Some(format!("{} {} aspect", placement1.element.name(), name)),
            });
        }
    }
}

/// Cross-system RESONATES edges: a person's Western sun element matching
/// their own day-master element (person → element), and one person's sun
/// element matching the partner's day-master element (planet → element).
fn add_resonance_edges(graph: &mut CompatibilityGraph, persons: &[PersonInput<'_>; 2]) {
    for person in persons {
        if person.astro.sun.element == person.saju.day_master.element {
            graph.edges.push(Edge {
                source: person.id.to_string(),
                target: element_id(person.saju.day_master.element),
                relation: RelationType::Resonates,
                weight: Some(UNIT_WEIGHT),
                label: Some("sun aligns with day master".to_string()),
            });
        }
    }
    for (this, other) in [(0usize, 1usize), (1, 0)] {
        let sun_element = persons[this].astro.sun.element;
        if sun_element == persons[other].saju.day_master.element {
            graph.edges.push(Edge {
                source: planet_id(&persons[this], "sun"),
                target: element_id(sun_element),
                relation: RelationType::Resonates,
                weight: Some(UNIT_WEIGHT),
                label: Some("sun resonates with partner day master".to_string()),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::fixtures::*;
    use crate::profile::{ElementCounts, YinYang};

    fn build_default() -> CompatibilityGraph {
        build(
            &saju_wood_yang(),
            &astro_wood_sun(),
            &saju_metal_yin(),
            &astro_fire_sun(),
        )
    }

    #[test]
    fn test_fixed_node_cardinalities() {
        let graph = build_default();
        assert_eq!(graph.nodes_of_type(NodeType::Person).count(), 2);
        assert_eq!(graph.nodes_of_type(NodeType::Element).count(), 5);
        assert_eq!(graph.nodes_of_type(NodeType::Pillar).count(), 8);
        // Both fixtures carry all four planets; person1 also has an ascendant.
        assert_eq!(graph.nodes_of_type(NodeType::Planet).count(), 9);
        assert!(graph.node("person1_ascendant").is_some());
        assert!(graph.node("person2_ascendant").is_none());
    }

    #[test]
    fn test_element_cycles_always_present() {
        let graph = build_default();
        assert_eq!(graph.edges_of_type(RelationType::Generates).count(), 5);
        assert_eq!(graph.edges_of_type(RelationType::Controls).count(), 5);
        // wood → fire generation edge exists
        assert!(graph.edges_of_type(RelationType::Generates).any(|e| {
            e.source == "element_wood" && e.target == "element_fire"
        }));
        // wood → earth control edge exists
        assert!(graph.edges_of_type(RelationType::Controls).any(|e| {
            e.source == "element_wood" && e.target == "element_earth"
        }));
    }

    #[test]
    fn test_referential_integrity() {
        let graph = build_default();
        assert!(graph.is_well_formed());
    }

    #[test]
    fn test_element_count_invariant() {
        let graph = build_default();
        let wood = graph.node("element_wood").unwrap();
        let total = wood.properties["total"].as_number().unwrap();
        let p1 = wood.properties["person1Count"].as_number().unwrap();
        let p2 = wood.properties["person2Count"].as_number().unwrap();
        assert_eq!(total, p1 + p2);
        // Verbatim from the raw inputs: 3 (wood_yang) + 1 (metal_yin).
        assert_eq!(p1, 3.0);
        assert_eq!(p2, 1.0);
        assert_eq!(wood.score, Some(4.0));
    }

    #[test]
    fn test_has_element_weight_is_share_of_total() {
        let graph = build_default();
        // person1 wood: 3 of 8 characters
        let edge = graph
            .edges_of_type(RelationType::HasElement)
            .find(|e| e.source == "person1" && e.target == "element_wood")
            .unwrap();
        assert!((edge.weight.unwrap() - 3.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_count_elements_have_no_edge() {
        let mut saju = saju_wood_yang();
        saju.elements = ElementCounts {
            wood: 4,
            fire: 4,
            ..Default::default()
        };
        let graph = build(&saju, &astro_wood_sun(), &saju_metal_yin(), &astro_fire_sun());
        assert!(!graph
            .edges_of_type(RelationType::HasElement)
            .any(|e| e.source == "person1" && e.target == "element_earth"));
        // The element node itself still exists.
        assert!(graph.node("element_earth").is_some());
    }

    #[test]
    fn test_opposite_polarity_produces_complements() {
        // wood/yang vs metal/yin
        let graph = build_default();
        let complements: Vec<_> = graph.edges_of_type(RelationType::Complements).collect();
        assert_eq!(complements.len(), 2);
        assert!(complements
            .iter()
            .any(|e| e.source == "yinyang_yang" && e.target == "yinyang_yin"));
    }

    #[test]
    fn test_same_polarity_produces_no_complements() {
        let graph = build(
            &saju_wood_yang(),
            &astro_wood_sun(),
            &saju_wood_yang(),
            &astro_fire_sun(),
        );
        assert_eq!(graph.edges_of_type(RelationType::Complements).count(), 0);
        assert_eq!(graph.nodes_of_type(NodeType::YinYang).count(), 1);
    }

    #[test]
    fn test_same_element_opposite_polarity_scenario() {
        // Two wood day masters with opposite polarity: COMPLEMENTS must exist.
        let graph = build(
            &saju_wood_yang(),
            &astro_wood_sun(),
            &saju_wood_yin(),
            &astro_fire_sun(),
        );
        assert!(graph.edges_of_type(RelationType::Complements).count() >= 1);
        // Matching day masters also harmonize.
        assert!(graph.edges_of_type(RelationType::Harmonizes).count() >= 1);
    }

    #[test]
    fn test_self_resonance_scenario() {
        // person1 sun element (wood) == own day master element (wood)
        let graph = build_default();
        assert!(graph.edges_of_type(RelationType::Resonates).any(|e| {
            e.source == "person1" && e.target == "element_wood"
        }));
    }

    #[test]
    fn test_cross_resonance_uses_planet_node() {
        // person2 sun is fire; give person1 a fire day master.
        let mut saju1 = saju_wood_yang();
        saju1.day_master.element = Element::Fire;
        let graph = build(&saju1, &astro_wood_sun(), &saju_metal_yin(), &astro_fire_sun());
        assert!(graph.edges_of_type(RelationType::Resonates).any(|e| {
            e.source == "person2_sun" && e.target == "element_fire"
        }));
    }

    #[test]
    fn test_day_master_control_produces_conflicts() {
        // metal controls wood: person2 (metal) → person1 (wood)
        let graph = build_default();
        let conflict = graph
            .edges_of_type(RelationType::Conflicts)
            .find(|e| e.source == "person2" && e.target == "person1")
            .unwrap();
        assert!(conflict.label.as_deref().unwrap().contains("metal"));
    }

    #[test]
    fn test_aspect_edges_on_shared_planet_element() {
        // Both fixtures have water moons and earth venus.
        let graph = build_default();
        let aspects: Vec<_> = graph.edges_of_type(RelationType::AspectsWith).collect();
        assert!(aspects
            .iter()
            .any(|e| e.source == "person1_moon" && e.target == "person2_moon"));
        assert!(aspects
            .iter()
            .any(|e| e.source == "person1_venus" && e.target == "person2_venus"));
    }

    #[test]
    fn test_missing_planets_degrade_gracefully() {
        let astro = crate::profile::AstrologyProfile {
            sun: placement("Leo", Element::Fire),
            moon: None,
            venus: None,
            mars: None,
            ascendant: None,
        };
        let graph = build(&saju_wood_yang(), &astro, &saju_metal_yin(), &astro_fire_sun());
        assert!(graph.is_well_formed());
        // person1 contributes only its sun node.
        assert_eq!(graph.nodes_of_type(NodeType::Planet).count(), 5);
        assert_eq!(
            graph
                .edges_of_type(RelationType::HasPlanet)
                .filter(|e| e.source == "person1")
                .count(),
            1
        );
    }

    #[test]
    fn test_shared_sun_sign_collapses_zodiac_node() {
        let graph = build(
            &saju_wood_yang(),
            &astro_fire_sun(),
            &saju_metal_yin(),
            &astro_fire_sun(),
        );
        assert_eq!(graph.nodes_of_type(NodeType::Zodiac).count(), 1);
        assert_eq!(graph.edges_of_type(RelationType::HasZodiac).count(), 2);
        assert!(graph.is_well_formed());
    }

    #[test]
    fn test_person_properties() {
        let graph = build_default();
        let person1 = graph.node("person1").unwrap();
        assert_eq!(person1.properties["dayMaster"].as_text(), Some("Gap"));
        assert_eq!(person1.properties["element"].as_text(), Some("wood"));
        assert_eq!(person1.properties["sunSign"].as_text(), Some("Pisces"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_default();
        let b = build_default();
        assert_eq!(a, b);
    }

    #[test]
    fn test_yinyang_polarity_differs_from_element_match() {
        // yang/yang pair with distinct elements: no complements, single
        // yin-yang node shared by both HAS_YINYANG edges.
        let mut saju2 = saju_metal_yin();
        saju2.day_master.yin_yang = YinYang::Yang;
        let graph = build(&saju_wood_yang(), &astro_wood_sun(), &saju2, &astro_fire_sun());
        assert_eq!(graph.edges_of_type(RelationType::Complements).count(), 0);
        assert_eq!(
            graph
                .edges_of_type(RelationType::HasYinYang)
                .filter(|e| e.target == "yinyang_yang")
                .count(),
            2
        );
    }
}
