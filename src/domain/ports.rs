use crate::domain::model::{Passage, Positions, UserData};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where planet positions for a chart come from.
///
/// The bundled [`crate::core::birth_chart::FixedPositions`] ignores the birth
/// details entirely. An ephemeris-backed source plugs in here.
pub trait PositionSource: Send + Sync {
    fn positions(&self, user: &UserData) -> Result<Positions>;
}

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

#[async_trait]
pub trait PassageRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>>;
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
