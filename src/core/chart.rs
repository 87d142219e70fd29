//! Placing planets into houses and classifying their strength.

use crate::domain::catalog::{self, House, Planet, PlanetName, HOUSES, PLANETS};
use crate::domain::model::{Effect, EffectKind, Effects, Positions};
use std::collections::BTreeMap;

/// Lookups over the fixed planet and house tables.
#[derive(Debug, Clone, Copy)]
pub struct ChartEngine {
    planets: &'static [Planet],
    houses: &'static [House],
}

impl Default for ChartEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartEngine {
    pub fn new() -> Self {
        Self {
            planets: &PLANETS,
            houses: &HOUSES,
        }
    }

    pub fn planets(&self) -> &'static [Planet] {
        self.planets
    }

    pub fn houses(&self) -> &'static [House] {
        self.houses
    }

    pub fn lookup_planet(&self, name: &str) -> Option<&'static Planet> {
        let planets = self.planets;
        planets.iter().find(|p| p.name.name() == name)
    }

    pub fn lookup_house(&self, number: u8) -> Option<&'static House> {
        let houses = self.houses;
        houses.iter().find(|h| h.number == number)
    }

    /// Bind positions to houses.
    ///
    /// Entries naming an unknown planet or a house outside 1..=12 are skipped.
    /// When two planets land in the same house the one supplied last wins.
    pub fn assign(&self, positions: &Positions) -> Chart {
        let mut occupancy = BTreeMap::new();

        for (planet_name, &house_number) in positions {
            match (self.lookup_planet(planet_name), self.lookup_house(house_number)) {
                (Some(planet), Some(house)) => {
                    if let Some(previous) = occupancy.insert(house.number, planet.name) {
                        tracing::debug!(
                            "{} replaces {} in house {}",
                            planet.name,
                            previous,
                            house.number
                        );
                    }
                }
                _ => {
                    tracing::debug!(
                        "Skipping position {} -> {}: no matching planet or house",
                        planet_name,
                        house_number
                    );
                }
            }
        }

        Chart {
            houses: self.houses,
            occupancy,
        }
    }
}

/// Houses plus the planet occupying each, fixed once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    houses: &'static [House],
    occupancy: BTreeMap<u8, PlanetName>,
}

impl Chart {
    pub fn houses(&self) -> &'static [House] {
        self.houses
    }

    pub fn occupant(&self, house_number: u8) -> Option<&'static Planet> {
        self.occupancy.get(&house_number).map(|name| name.planet())
    }

    pub fn occupancy(&self) -> &BTreeMap<u8, PlanetName> {
        &self.occupancy
    }

    /// One [`Effect`] per occupied house, ascending by house number.
    pub fn classify(&self) -> Vec<Effect> {
        self.houses
            .iter()
            .filter_map(|house| {
                self.occupant(house.number)
                    .map(|planet| determine_effect(planet, house))
            })
            .collect()
    }

    /// House number -> effect sentence. Unoccupied houses have no entry.
    pub fn compute_effects(&self) -> Effects {
        self.classify()
            .into_iter()
            .map(|effect| (effect.house, effect.description()))
            .collect()
    }
}

fn determine_effect(planet: &Planet, house: &House) -> Effect {
    let kind = if house.number == planet.exalted_house {
        EffectKind::Exalted
    } else if house.number == planet.debilitated_house {
        EffectKind::Debilitated
    } else {
        EffectKind::Neutral
    };

    Effect {
        house: house.number,
        planet: planet.name,
        kind,
    }
}

/// Classify one planet in one house without building a chart.
pub fn classify_placement(planet: PlanetName, house_number: u8) -> Option<Effect> {
    catalog::house(house_number).map(|house| determine_effect(planet.planet(), house))
}
