use crate::core::birth_chart::{generate_birth_chart_with, FixedPositions};
use crate::core::prompt::{clean_answer, ChartPrompt};
use crate::domain::model::{InsightResponse, UserData};
use crate::domain::ports::{CompletionClient, PassageRetriever, PositionSource};
use crate::utils::error::{Result, ResultExt};
use crate::utils::validation::Validate;

pub const FALLBACK_ANSWER: &str = "No astrological insights available at this time.";

/// Chart, retrieval and completion for one user query.
pub struct InsightEngine<R: PassageRetriever, C: CompletionClient, P: PositionSource = FixedPositions> {
    retriever: R,
    completion: C,
    positions: P,
}

impl<R: PassageRetriever, C: CompletionClient> InsightEngine<R, C, FixedPositions> {
    pub fn new(retriever: R, completion: C) -> Self {
        Self {
            retriever,
            completion,
            positions: FixedPositions,
        }
    }
}

impl<R: PassageRetriever, C: CompletionClient, P: PositionSource> InsightEngine<R, C, P> {
    pub fn with_position_source<Q: PositionSource>(self, positions: Q) -> InsightEngine<R, C, Q> {
        InsightEngine {
            retriever: self.retriever,
            completion: self.completion,
            positions,
        }
    }

    pub async fn run(&self, user: &UserData) -> Result<InsightResponse> {
        user.validate().located()?;

        tracing::info!("🔮 Generating birth chart for {}", user.name);
        let chart = generate_birth_chart_with(&self.positions, user)?;

        tracing::info!("📚 Retrieving passages for query");
        let passages = self.retriever.retrieve(&user.query).await.located()?;
        tracing::debug!("Retrieved {} passages", passages.len());

        let prompt = ChartPrompt::new(&chart.report, &chart.effects, &passages, &user.query);
        let rendered = prompt.render();
        tracing::debug!("Prompt is {} characters", rendered.len());

        tracing::info!("🤖 Requesting completion");
        let raw = self.completion.complete(&rendered).await.located()?;

        let answer = clean_answer(&raw);
        let answer = if answer.is_empty() {
            tracing::warn!("Completion was empty, using fallback answer");
            FALLBACK_ANSWER.to_string()
        } else {
            answer
        };

        Ok(InsightResponse {
            answer,
            birth_chart: chart.report,
            effects: chart.effects,
        })
    }
}
