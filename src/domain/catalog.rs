//! The fixed planet and house tables the chart rules are built on.
//!
//! Nine planets, twelve houses. Everything here is a compile-time constant
//! and is never mutated, so the tables are shared freely between requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The 9 planets of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanetName {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

/// All 9 planets in traditional order.
pub const ALL_PLANETS: [PlanetName; 9] = [
    PlanetName::Sun,
    PlanetName::Moon,
    PlanetName::Mars,
    PlanetName::Mercury,
    PlanetName::Jupiter,
    PlanetName::Venus,
    PlanetName::Saturn,
    PlanetName::Rahu,
    PlanetName::Ketu,
];

pub const HOUSE_COUNT: u8 = 12;

impl PlanetName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_PLANETS.
    pub const fn index(self) -> usize {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mars => 2,
            Self::Mercury => 3,
            Self::Jupiter => 4,
            Self::Venus => 5,
            Self::Saturn => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    /// Exact, case-sensitive match on the canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_PLANETS.iter().copied().find(|p| p.name() == name)
    }

    pub fn planet(self) -> &'static Planet {
        &PLANETS[self.index()]
    }
}

impl fmt::Display for PlanetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanetName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown planet: {s}"))
    }
}

/// A planet's fixed dignities and relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Planet {
    pub name: PlanetName,
    pub exalted_house: u8,
    pub debilitated_house: u8,
    /// None for Rahu and Ketu.
    pub ruling_house: Option<u8>,
    pub friendly_planets: &'static [PlanetName],
    pub enemy_planets: &'static [PlanetName],
}

impl Planet {
    pub fn is_friend(&self, other: PlanetName) -> bool {
        self.friendly_planets.contains(&other)
    }

    pub fn is_enemy(&self, other: PlanetName) -> bool {
        self.enemy_planets.contains(&other)
    }
}

/// A house and its lords. Occupancy lives on [`crate::core::chart::Chart`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct House {
    pub number: u8,
    pub ruling_planet: PlanetName,
    pub significators: &'static [PlanetName],
}

impl House {
    /// Significators joined with ", " (house 8 is "Saturn, Mars, Moon").
    pub fn significator_label(&self) -> String {
        self.significators
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use PlanetName::*;

pub static PLANETS: [Planet; 9] = [
    Planet {
        name: Sun,
        exalted_house: 1,
        debilitated_house: 7,
        ruling_house: Some(5),
        friendly_planets: &[Moon, Mars, Jupiter],
        enemy_planets: &[Venus, Saturn, Rahu],
    },
    Planet {
        name: Moon,
        exalted_house: 2,
        debilitated_house: 8,
        ruling_house: Some(4),
        friendly_planets: &[Sun, Mercury],
        enemy_planets: &[Rahu, Ketu],
    },
    Planet {
        name: Mars,
        exalted_house: 10,
        debilitated_house: 4,
        ruling_house: Some(1),
        friendly_planets: &[Sun, Moon, Jupiter],
        enemy_planets: &[Mercury, Ketu],
    },
    Planet {
        name: Mercury,
        exalted_house: 6,
        debilitated_house: 12,
        ruling_house: Some(3),
        friendly_planets: &[Sun, Venus, Rahu],
        enemy_planets: &[Moon],
    },
    Planet {
        name: Jupiter,
        exalted_house: 4,
        debilitated_house: 10,
        ruling_house: Some(9),
        friendly_planets: &[Sun, Moon, Mars],
        enemy_planets: &[Mercury, Venus],
    },
    Planet {
        name: Venus,
        exalted_house: 12,
        debilitated_house: 6,
        ruling_house: Some(7),
        friendly_planets: &[Mercury, Saturn, Ketu],
        enemy_planets: &[Sun, Moon, Rahu],
    },
    Planet {
        name: Saturn,
        exalted_house: 7,
        debilitated_house: 1,
        ruling_house: Some(10),
        friendly_planets: &[Mercury, Venus, Rahu],
        enemy_planets: &[Sun, Moon, Mars],
    },
    Planet {
        name: Rahu,
        exalted_house: 3,
        debilitated_house: 9,
        ruling_house: None,
        friendly_planets: &[Mercury, Saturn, Ketu],
        enemy_planets: &[Sun, Mars],
    },
    Planet {
        name: Ketu,
        exalted_house: 9,
        debilitated_house: 3,
        ruling_house: None,
        friendly_planets: &[Venus, Rahu],
        enemy_planets: &[Moon, Mars],
    },
];

pub static HOUSES: [House; 12] = [
    House { number: 1, ruling_planet: Mars, significators: &[Sun] },
    House { number: 2, ruling_planet: Venus, significators: &[Jupiter] },
    House { number: 3, ruling_planet: Mercury, significators: &[Mars] },
    House { number: 4, ruling_planet: Moon, significators: &[Moon] },
    House { number: 5, ruling_planet: Sun, significators: &[Jupiter] },
    House { number: 6, ruling_planet: Mercury, significators: &[Ketu] },
    House { number: 7, ruling_planet: Venus, significators: &[Venus] },
    House { number: 8, ruling_planet: Mars, significators: &[Saturn, Mars, Moon] },
    House { number: 9, ruling_planet: Jupiter, significators: &[Jupiter] },
    House { number: 10, ruling_planet: Saturn, significators: &[Saturn] },
    House { number: 11, ruling_planet: Saturn, significators: &[Jupiter] },
    House { number: 12, ruling_planet: Jupiter, significators: &[Rahu] },
];

/// House by 1-based number. None outside 1..=12.
pub fn house(number: u8) -> Option<&'static House> {
    if number == 0 || number > HOUSE_COUNT {
        return None;
    }
    Some(&HOUSES[(number - 1) as usize])
}
