//! Five-element vocabulary and the fixed generation/control cycles.

use serde::{Deserialize, Serialize};

/// One of the five elements of the Saju (four-pillar) system.
///
/// The order of [`Element::ALL`] is the generation-cycle order:
/// wood → fire → earth → metal → water → wood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// All five elements in generation-cycle order.
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// Lowercase name used in node ids and property keys.
    pub fn name(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }

    /// Capitalized display label.
    pub fn label(self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }

    fn cycle_index(self) -> usize {
        Element::ALL
            .iter()
            .position(|e| *e == self)
            .unwrap_or_default()
    }

    /// The element this one generates (next in the generation cycle).
    pub fn generates(self) -> Element {
        Element::ALL[(self.cycle_index() + 1) % 5]
    }

    /// The element this one controls (two steps ahead in the generation cycle).
    pub fn controls(self) -> Element {
        Element::ALL[(self.cycle_index() + 2) % 5]
    }
}

/// Yin/yang polarity of a day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YinYang {
    Yin,
    Yang,
}

impl YinYang {
    /// Lowercase name used in node ids.
    pub fn name(self) -> &'static str {
        match self {
            YinYang::Yin => "yin",
            YinYang::Yang => "yang",
        }
    }

    /// Capitalized display label.
    pub fn label(self) -> &'static str {
        match self {
            YinYang::Yin => "Yin",
            YinYang::Yang => "Yang",
        }
    }

    /// The opposite polarity.
    pub fn opposite(self) -> YinYang {
        match self {
            YinYang::Yin => YinYang::Yang,
            YinYang::Yang => YinYang::Yin,
        }
    }
}
