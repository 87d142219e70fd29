use crate::config::toml_config::EmbeddingConfig;
use crate::domain::ports::Embedder;
use crate::utils::error::{AstroError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Embeddings from an Ollama server (`POST /api/embeddings`).
pub struct OllamaEmbedder {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(client: Client, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self::new(client, &config.endpoint, &config.model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/api/embeddings", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.url();
        tracing::debug!("Requesting embedding from: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AstroError::LlmError {
                message: format!("embedding request returned {}: {}", status, body),
            });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        if parsed.embedding.is_empty() {
            return Err(AstroError::LlmError {
                message: format!("model {} returned an empty embedding", self.model),
            });
        }
        Ok(parsed.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_embed_posts_model_and_prompt() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/embeddings")
                    .body_contains("\"model\":\"nomic-embed-text\"")
                    .body_contains("\"prompt\":\"Venus in Libra\"");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({"embedding": [0.5, -0.25, 1.0]}));
            })
            .await;

        let embedder = OllamaEmbedder::new(Client::new(), server.base_url(), "nomic-embed-text");
        let vector = embedder.embed("Venus in Libra").await.unwrap();

        mock.assert_async().await;
        assert_eq!(vector, vec![0.5, -0.25, 1.0]);
    }

    #[tokio::test]
    async fn test_embed_error_status_is_llm_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(404).body("model not found");
            })
            .await;

        let embedder = OllamaEmbedder::new(Client::new(), server.base_url(), "missing-model");
        let err = embedder.embed("x").await.unwrap_err();

        match err {
            AstroError::LlmError { message } => {
                assert!(message.contains("404"));
                assert!(message.contains("model not found"));
            }
            other => panic!("expected LlmError, got {:?}", other),
        }
    }
}
