use crate::core::chart::ChartEngine;
use crate::core::report::render_chart;
use crate::domain::model::{Effects, Positions, UserData};
use crate::domain::ports::PositionSource;
use crate::utils::error::{AstroError, Result};
use serde::{Deserialize, Serialize};

/// Positions used for every chart until real ephemeris data is wired in.
pub const EXAMPLE_POSITIONS: [(&str, u8); 9] = [
    ("Sun", 1),
    ("Moon", 4),
    ("Mars", 7),
    ("Mercury", 3),
    ("Jupiter", 9),
    ("Venus", 6),
    ("Saturn", 10),
    ("Rahu", 11),
    ("Ketu", 12),
];

/// Always returns [`EXAMPLE_POSITIONS`], whatever the birth details say.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPositions;

impl PositionSource for FixedPositions {
    fn positions(&self, user: &UserData) -> Result<Positions> {
        tracing::debug!(
            "Using example positions; birth details for {} ({} {} at {}) are not yet used",
            user.name,
            user.dob,
            user.time_of_birth,
            user.place_of_birth
        );
        Ok(EXAMPLE_POSITIONS
            .iter()
            .map(|(name, house)| (name.to_string(), *house))
            .collect())
    }
}

/// Report text and effects for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthChart {
    pub report: String,
    pub effects: Effects,
}

/// Build a chart from the example positions. Returns `(report, effects)`.
pub fn generate_birth_chart(user: &UserData) -> Result<(String, Effects)> {
    let chart = generate_birth_chart_with(&FixedPositions, user)?;
    Ok((chart.report, chart.effects))
}

pub fn generate_birth_chart_with<P: PositionSource + ?Sized>(
    source: &P,
    user: &UserData,
) -> Result<BirthChart> {
    let positions = source.positions(user).map_err(|e| {
        AstroError::ChartError {
            message: format!("could not determine planet positions: {}", e),
        }
        .located()
    })?;

    let chart = ChartEngine::new().assign(&positions);
    let effects = chart.compute_effects();
    let report = render_chart(&chart);

    tracing::info!(
        "🪐 Birth chart generated for {}: {} occupied houses",
        user.name,
        effects.len()
    );

    Ok(BirthChart { report, effects })
}
