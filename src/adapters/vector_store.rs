use crate::domain::model::Passage;
use crate::domain::ports::{Embedder, PassageRetriever};
use crate::utils::error::{AstroError, Result, ResultExt};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_TOP_K: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub source: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A flat, JSON-serialized list of embedded chunks. Search is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorIndex {
    pub model: String,
    pub dimensions: usize,
    pub chunks: Vec<IndexedChunk>,
}

impl VectorIndex {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            dimensions: 0,
            chunks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The first chunk fixes the dimensionality; later chunks must match it.
    pub fn push(&mut self, chunk: IndexedChunk) -> Result<()> {
        if chunk.embedding.is_empty() {
            return Err(AstroError::VectorStoreError {
                message: format!("empty embedding for chunk from {}", chunk.source),
            });
        }
        if self.chunks.is_empty() {
            self.dimensions = chunk.embedding.len();
        } else if chunk.embedding.len() != self.dimensions {
            return Err(AstroError::VectorStoreError {
                message: format!(
                    "embedding from {} has {} dimensions, index has {}",
                    chunk.source,
                    chunk.embedding.len(),
                    self.dimensions
                ),
            });
        }
        self.chunks.push(chunk);
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AstroError::VectorStoreError {
                message: format!("vector index not found at {}", path.display()),
            }
            .located());
        }

        let content = fs::read_to_string(path).located()?;
        let index: VectorIndex = serde_json::from_str(&content).located()?;
        tracing::debug!(
            "Loaded vector index from {} ({} chunks, {} dimensions)",
            path.display(),
            index.len(),
            index.dimensions
        );
        Ok(index)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).located()?;
            }
        }
        let json = serde_json::to_string(self).located()?;
        fs::write(path, json).located()?;
        Ok(())
    }

    /// Top `top_k` chunks by cosine similarity, best first. Ties keep index order.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<Passage> {
        let mut scored: Vec<Passage> = self
            .chunks
            .iter()
            .map(|chunk| Passage {
                source: chunk.source.clone(),
                text: chunk.text.clone(),
                score: cosine_similarity(query, &chunk.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }
}

/// Zero when lengths differ or either vector has no magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Embeds the query and searches a loaded index.
pub struct VectorStoreRetriever<E: Embedder> {
    index: VectorIndex,
    embedder: E,
    top_k: usize,
}

impl<E: Embedder> VectorStoreRetriever<E> {
    pub fn new(index: VectorIndex, embedder: E, top_k: usize) -> Self {
        Self {
            index,
            embedder,
            top_k,
        }
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}

#[async_trait]
impl<E: Embedder> PassageRetriever for VectorStoreRetriever<E> {
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>> {
        if self.index.is_empty() {
            tracing::warn!("Vector index is empty, no context will be retrieved");
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await?;
        if query_vector.len() != self.index.dimensions {
            return Err(AstroError::VectorStoreError {
                message: format!(
                    "query embedding has {} dimensions, index has {}",
                    query_vector.len(),
                    self.index.dimensions
                ),
            });
        }

        Ok(self.index.search(&query_vector, self.top_k))
    }
}
