use crate::core::chart::Chart;
use crate::domain::model::Effects;

/// One line per house, ascending:
/// `House {n}: Ruling Planet - {ruling}, Planet - {occupant or None}`.
pub fn render_chart(chart: &Chart) -> String {
    chart
        .houses()
        .iter()
        .map(|house| {
            let occupant = chart
                .occupant(house.number)
                .map(|p| p.name.name())
                .unwrap_or("None");
            format!(
                "House {}: Ruling Planet - {}, Planet - {}\n",
                house.number, house.ruling_planet, occupant
            )
        })
        .collect()
}

/// Effects as `House {n}: {sentence}` lines, for prompts and terminal output.
pub fn render_effects(effects: &Effects) -> String {
    effects
        .iter()
        .map(|(house, sentence)| format!("House {}: {}\n", house, sentence))
        .collect()
}
