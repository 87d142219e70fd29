use crate::core::report::render_effects;
use crate::domain::model::{Effects, Passage};

/// Everything the completion model sees for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPrompt<'a> {
    pub birth_chart: &'a str,
    pub effects: &'a Effects,
    pub context: String,
    pub input: &'a str,
}

impl<'a> ChartPrompt<'a> {
    pub fn new(
        birth_chart: &'a str,
        effects: &'a Effects,
        passages: &[Passage],
        input: &'a str,
    ) -> Self {
        Self {
            birth_chart,
            effects,
            context: join_context(passages),
            input,
        }
    }

    /// Fill the expert-astrologer template in one pass; substituted values
    /// are emitted verbatim even if they contain `{...}`.
    pub fn render(&self) -> String {
        format!(
            "\
You are an expert astrologer. Given the astrological context from the user's birth chart, planetary effects and related documents, provide a personalized and insightful astrological response to their query.

Birth Chart Details:
{birth_chart}

Planetary Effects:
{effects}

Relevant Astrological Literature Context:
{context}

Based on the above, respond to the following user query in detail:
User Query: {input}
",
            birth_chart = self.birth_chart.trim_end(),
            effects = render_effects(self.effects).trim_end(),
            context = self.context,
            input = self.input,
        )
    }
}

/// Passage texts joined by single spaces, in retrieval order.
pub fn join_context(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Models like to bold things; answers are shown as plain text.
pub fn clean_answer(raw: &str) -> String {
    raw.replace("**", "").trim().to_string()
}
