//! Input profile types: Saju (four-pillar) and Western astrology.
//!
//! These shapes are supplied by an upstream chart-calculation service; the
//! engine consumes them read-only. Structural validation happens once, via
//! [`validate_profiles`], before graph construction.

mod elements;

pub use elements::{Element, YinYang};

use serde::{Deserialize, Serialize};

use crate::{Result, SynastryError};

/// The day-master identity derived from a person's day pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayMaster {
    /// Day-master element, e.g. wood for a Gap/Eul day stem.
    pub element: Element,
    /// Day-master polarity.
    pub yin_yang: YinYang,
    /// Stem name, e.g. `Gap` or `Byeong`.
    pub name: String,
}

/// One stem/branch pair of the four-pillar chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: String,
    pub branch: String,
}

/// The four pillars: year, month, day, time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub time: Pillar,
}

impl Pillars {
    /// Pillars with their slot names, in chart order.
    pub fn slots(&self) -> [(&'static str, &Pillar); 4] {
        [
            ("year", &self.year),
            ("month", &self.month),
            ("day", &self.day),
            ("time", &self.time),
        ]
    }
}

/// Per-element occurrence counts across a person's eight characters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementCounts {
    #[serde(default)]
    pub wood: u32,
    #[serde(default)]
    pub fire: u32,
    #[serde(default)]
    pub earth: u32,
    #[serde(default)]
    pub metal: u32,
    #[serde(default)]
    pub water: u32,
}

impl ElementCounts {
    /// Count for a single element.
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    /// Sum over all five elements.
    pub fn total(&self) -> u32 {
        Element::ALL.iter().map(|e| self.get(*e)).sum()
    }
}

/// Four-pillar elemental profile for one person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SajuProfile {
    pub day_master: DayMaster,
    pub pillars: Pillars,
    pub elements: ElementCounts,
}

/// One planetary placement: zodiac sign plus the sign's element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// Sign name, e.g. `Aries`.
    pub sign: String,
    /// Western element of the sign, mapped onto the five-element vocabulary
    /// by the upstream chart service.
    pub element: Element,
}

/// Western astrological profile for one person.
///
/// Only the sun placement is required; missing planets reduce graph content
/// but are never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstrologyProfile {
    pub sun: Placement,
    #[serde(default)]
    pub moon: Option<Placement>,
    #[serde(default)]
    pub venus: Option<Placement>,
    #[serde(default)]
    pub mars: Option<Placement>,
    #[serde(default)]
    pub ascendant: Option<Placement>,
}

impl AstrologyProfile {
    /// Tracked planets with their populated placements, in fixed order.
    pub fn planets(&self) -> Vec<(&'static str, &Placement)> {
        let mut out = vec![("sun", &self.sun)];
        if let Some(ref moon) = self.moon {
            out.push(("moon", moon));
        }
        if let Some(ref venus) = self.venus {
            out.push(("venus", venus));
        }
        if let Some(ref mars) = self.mars {
            out.push(("mars", mars));
        }
        out
    }

    /// Placement for a tracked planet by name, if populated.
    pub fn planet(&self, name: &str) -> Option<&Placement> {
        match name {
            "sun" => Some(&self.sun),
            "moon" => self.moon.as_ref(),
            "venus" => self.venus.as_ref(),
            "mars" => self.mars.as_ref(),
            _ => None,
        }
    }
}

/// Names of the tracked planets, in construction order.
pub const TRACKED_PLANETS: [&str; 4] = ["sun", "moon", "venus", "mars"];

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SynastryError::Validation(format!("{} is empty", what)));
    }
    Ok(())
}

/// Validate one person's profile pair before graph construction.
///
/// Checks structurally required fields only; optional placements are allowed
/// to be absent. Runs once per person, before `build()`; the engine never
/// re-validates downstream.
pub fn validate_profiles(saju: &SajuProfile, astro: &AstrologyProfile) -> Result<()> {
    require_non_empty(&saju.day_master.name, "day master name")?;
    for (slot, pillar) in saju.pillars.slots() {
        require_non_empty(&pillar.stem, &format!("{} pillar stem", slot))?;
        require_non_empty(&pillar.branch, &format!("{} pillar branch", slot))?;
    }
    require_non_empty(&astro.sun.sign, "sun sign")?;
    for name in TRACKED_PLANETS {
        if let Some(placement) = astro.planet(name) {
            require_non_empty(&placement.sign, &format!("{} sign", name))?;
        }
    }
    if let Some(ref asc) = astro.ascendant {
        require_non_empty(&asc.sign, "ascendant sign")?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn pillar(stem: &str, branch: &str) -> Pillar {
        Pillar {
            stem: stem.to_string(),
            branch: branch.to_string(),
        }
    }

    /// A wood/yang day master with a spread of element counts.
    pub fn saju_wood_yang() -> SajuProfile {
        SajuProfile {
            day_master: DayMaster {
                element: Element::Wood,
                yin_yang: YinYang::Yang,
                name: "Gap".to_string(),
            },
            pillars: Pillars {
                year: pillar("Gap", "Ja"),
                month: pillar("Eul", "Chuk"),
                day: pillar("Gap", "In"),
                time: pillar("Byeong", "Myo"),
            },
            elements: ElementCounts {
                wood: 3,
                fire: 2,
                earth: 1,
                metal: 1,
                water: 1,
            },
        }
    }

    /// A wood/yin day master.
    pub fn saju_wood_yin() -> SajuProfile {
        let mut saju = saju_wood_yang();
        saju.day_master.yin_yang = YinYang::Yin;
        saju.day_master.name = "Eul".to_string();
        saju.elements = ElementCounts {
            wood: 2,
            fire: 1,
            earth: 2,
            metal: 2,
            water: 1,
        };
        saju
    }

    /// A metal/yin day master.
    pub fn saju_metal_yin() -> SajuProfile {
        SajuProfile {
            day_master: DayMaster {
                element: Element::Metal,
                yin_yang: YinYang::Yin,
                name: "Sin".to_string(),
            },
            pillars: Pillars {
                year: pillar("Sin", "Yu"),
                month: pillar("Gyeong", "Sin"),
                day: pillar("Sin", "Hae"),
                time: pillar("Im", "Ja"),
            },
            elements: ElementCounts {
                wood: 1,
                fire: 1,
                earth: 1,
                metal: 3,
                water: 2,
            },
        }
    }

    pub fn placement(sign: &str, element: Element) -> Placement {
        Placement {
            sign: sign.to_string(),
            element,
        }
    }

    /// Full four-planet chart with a wood sun (Pisces mapped to wood here
    /// purely as test data; the real sign→element mapping is upstream).
    pub fn astro_wood_sun() -> AstrologyProfile {
        AstrologyProfile {
            sun: placement("Pisces", Element::Wood),
            moon: Some(placement("Cancer", Element::Water)),
            venus: Some(placement("Taurus", Element::Earth)),
            mars: Some(placement("Aries", Element::Fire)),
            ascendant: Some(placement("Leo", Element::Fire)),
        }
    }

    /// Full four-planet chart with a fire sun.
    pub fn astro_fire_sun() -> AstrologyProfile {
        AstrologyProfile {
            sun: placement("Leo", Element::Fire),
            moon: Some(placement("Scorpio", Element::Water)),
            venus: Some(placement("Virgo", Element::Earth)),
            mars: Some(placement("Sagittarius", Element::Fire)),
            ascendant: None,
        }
    }
}
