use crate::domain::catalog::PlanetName;
use crate::utils::error::Result;
use crate::utils::validation::{validate_date, validate_non_empty_string, validate_time, Validate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Planet name -> house number, in the order the caller supplied them.
/// Keys are raw strings since positions come from outside.
pub type Positions = IndexMap<String, u8>;

/// House number -> effect sentence, ascending by house.
pub type Effects = BTreeMap<u8, String>;

/// What a user submits when asking for insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    pub dob: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub gender: String,
    pub query: String,
}

impl UserData {
    /// Everything a chart needs; the query is only required when asking for insights.
    pub fn validate_birth_details(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_date("dob", &self.dob)?;
        validate_time("time_of_birth", &self.time_of_birth)?;
        validate_non_empty_string("place_of_birth", &self.place_of_birth)?;
        Ok(())
    }
}

impl Validate for UserData {
    fn validate(&self) -> Result<()> {
        self.validate_birth_details()?;
        validate_non_empty_string("query", &self.query)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Exalted,
    Debilitated,
    Neutral,
}

/// Strength of one occupant in one house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub house: u8,
    pub planet: PlanetName,
    pub kind: EffectKind,
}

impl Effect {
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EffectKind::Exalted => write!(
                f,
                "{} is exalted in house {}, giving strong positive effects.",
                self.planet, self.house
            ),
            EffectKind::Debilitated => write!(
                f,
                "{} is debilitated in house {}, giving weak or negative effects.",
                self.planet, self.house
            ),
            EffectKind::Neutral => write!(f, "{} is neutral in house {}.", self.planet, self.house),
        }
    }
}

/// A retrieved chunk of reference literature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub source: String,
    pub text: String,
    pub score: f32,
}

/// The JSON body returned for an insight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightResponse {
    pub answer: String,
    pub birth_chart: String,
    pub effects: Effects,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> UserData {
        UserData {
            name: "Asha".to_string(),
            dob: "1990-04-12".to_string(),
            time_of_birth: "06:45".to_string(),
            place_of_birth: "Pune".to_string(),
            gender: "female".to_string(),
            query: "What does my career look like?".to_string(),
        }
    }

    #[test]
    fn test_user_data_validation() {
        assert!(sample_user().validate().is_ok());

        let mut bad_date = sample_user();
        bad_date.dob = "April 12".to_string();
        assert!(bad_date.validate().is_err());

        let mut empty_query = sample_user();
        empty_query.query = "   ".to_string();
        assert!(empty_query.validate().is_err());
    }

    #[test]
    fn test_birth_details_without_query() {
        let mut chart_only = sample_user();
        chart_only.query = String::new();
        assert!(chart_only.validate_birth_details().is_ok());
        assert!(chart_only.validate().is_err());

        chart_only.dob = "garbage".to_string();
        let err = chart_only.validate_birth_details().unwrap_err();
        assert!(err.to_string().contains("dob"));

        let mut bad_time = sample_user();
        bad_time.time_of_birth = "25:99".to_string();
        assert!(bad_time.validate_birth_details().is_err());
    }

    #[test]
    fn test_effect_sentences() {
        let exalted = Effect {
            house: 1,
            planet: PlanetName::Sun,
            kind: EffectKind::Exalted,
        };
        assert_eq!(
            exalted.description(),
            "Sun is exalted in house 1, giving strong positive effects."
        );

        let debilitated = Effect {
            house: 4,
            planet: PlanetName::Mars,
            kind: EffectKind::Debilitated,
        };
        assert_eq!(
            debilitated.description(),
            "Mars is debilitated in house 4, giving weak or negative effects."
        );

        let neutral = Effect {
            house: 7,
            planet: PlanetName::Mars,
            kind: EffectKind::Neutral,
        };
        assert_eq!(neutral.description(), "Mars is neutral in house 7.");
    }

    #[test]
    fn test_insight_response_serializes_effects_by_house() {
        let mut effects = Effects::new();
        effects.insert(1, "Sun is neutral in house 1.".to_string());
        let response = InsightResponse {
            answer: "ok".to_string(),
            birth_chart: "House 1: ...".to_string(),
            effects,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["effects"]["1"], "Sun is neutral in house 1.");
    }
}
