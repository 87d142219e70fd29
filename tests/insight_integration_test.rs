use anyhow::Result;
use astro_insight::adapters::vector_store::IndexedChunk;
use astro_insight::core::insight::FALLBACK_ANSWER;
use astro_insight::{
    AppConfig, AstroError, ChatCompletionClient, IndexBuilder, InsightEngine, OllamaEmbedder,
    TextSplitter, UserData, VectorIndex, VectorStoreRetriever,
};
use httpmock::prelude::*;
use reqwest::Client;
use std::fs;
use tempfile::TempDir;

fn user() -> UserData {
    UserData {
        name: "Anika".to_string(),
        dob: "1995-09-30".to_string(),
        time_of_birth: "18:20".to_string(),
        place_of_birth: "Mumbai".to_string(),
        gender: "female".to_string(),
        query: "How will my career develop?".to_string(),
    }
}

fn saved_index(dir: &TempDir) -> Result<std::path::PathBuf> {
    let mut index = VectorIndex::new("nomic-embed-text");
    index.push(IndexedChunk {
        source: "career.txt".to_string(),
        text: "Saturn in the tenth house rewards patient effort.".to_string(),
        embedding: vec![1.0, 0.0],
    })?;
    index.push(IndexedChunk {
        source: "love.txt".to_string(),
        text: "Venus governs relationships.".to_string(),
        embedding: vec![0.0, 1.0],
    })?;

    let path = dir.path().join("vector_embedding.json");
    index.save(&path)?;
    Ok(path)
}

#[tokio::test]
async fn test_ask_end_to_end_with_mocked_services() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let index_path = saved_index(&temp_dir)?;

    let ollama = MockServer::start_async().await;
    let embed_mock = ollama
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/embeddings")
                .body_contains("How will my career develop?");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"embedding": [0.9, 0.1]}));
        })
        .await;

    let groq = MockServer::start_async().await;
    let chat_mock = groq
        .mock_async(|when, then| {
            when.method(POST)
                .path("/openai/v1/chat/completions")
                .header("Authorization", "Bearer gsk_integration")
                .body_contains("Saturn in the tenth house rewards patient effort.")
                .body_contains("Sun is exalted in house 1")
                .body_contains("User Query: How will my career develop?");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "**Steady** growth after 30."}}]
                }));
        })
        .await;

    let mut config = AppConfig::default();
    config.llm.endpoint = groq.url("/openai/v1");
    config.llm.api_key = Some("gsk_integration".to_string());
    config.embedding.endpoint = ollama.base_url();
    config.vector_store.top_k = 1;

    let index = VectorIndex::load(&index_path)?;
    let retriever = VectorStoreRetriever::new(
        index,
        OllamaEmbedder::from_config(&config.embedding)?,
        config.vector_store.top_k,
    );
    let completion = ChatCompletionClient::from_config(&config)?;
    let engine = InsightEngine::new(retriever, completion);

    let response = engine.run(&user()).await?;

    embed_mock.assert_async().await;
    chat_mock.assert_async().await;
    assert_eq!(response.answer, "Steady growth after 30.");
    assert!(response
        .birth_chart
        .starts_with("House 1: Ruling Planet - Mars, Planet - Sun\n"));
    assert_eq!(
        response.effects[&6],
        "Venus is debilitated in house 6, giving weak or negative effects."
    );

    let json = serde_json::to_value(&response)?;
    assert_eq!(json["answer"], "Steady growth after 30.");
    assert_eq!(json["effects"]["7"], "Mars is neutral in house 7.");
    Ok(())
}

#[tokio::test]
async fn test_empty_completion_falls_back() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let index_path = saved_index(&temp_dir)?;

    let ollama = MockServer::start_async().await;
    ollama
        .mock_async(|when, then| {
            when.method(POST).path("/api/embeddings");
            then.status(200)
                .json_body(serde_json::json!({"embedding": [0.0, 1.0]}));
        })
        .await;

    let groq = MockServer::start_async().await;
    groq.mock_async(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(serde_json::json!({"choices": [{"message": {"content": null}}]}));
    })
    .await;

    let retriever = VectorStoreRetriever::new(
        VectorIndex::load(&index_path)?,
        OllamaEmbedder::new(Client::new(), ollama.base_url(), "nomic-embed-text"),
        2,
    );
    let completion = ChatCompletionClient::new(Client::new(), groq.base_url(), "llama3-8b-8192", "k");

    let response = InsightEngine::new(retriever, completion).run(&user()).await?;
    assert_eq!(response.answer, FALLBACK_ANSWER);
    Ok(())
}

#[tokio::test]
async fn test_llm_failure_is_reported_not_swallowed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let index_path = saved_index(&temp_dir)?;

    let ollama = MockServer::start_async().await;
    ollama
        .mock_async(|when, then| {
            when.method(POST).path("/api/embeddings");
            then.status(200).json_body(serde_json::json!({"embedding": [1.0, 0.0]}));
        })
        .await;

    let groq = MockServer::start_async().await;
    groq.mock_async(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(500).body("upstream overloaded");
    })
    .await;

    let retriever = VectorStoreRetriever::new(
        VectorIndex::load(&index_path)?,
        OllamaEmbedder::new(Client::new(), ollama.base_url(), "nomic-embed-text"),
        2,
    );
    let completion = ChatCompletionClient::new(Client::new(), groq.base_url(), "m", "k");

    let err = InsightEngine::new(retriever, completion)
        .run(&user())
        .await
        .unwrap_err();

    assert!(matches!(err, AstroError::Located { .. }));
    assert!(matches!(err.root(), AstroError::LlmError { .. }));
    assert!(err.to_string().contains("upstream overloaded"));
    Ok(())
}

#[tokio::test]
async fn test_build_index_then_query_it() -> Result<()> {
    let docs = TempDir::new()?;
    let out = TempDir::new()?;
    fs::write(
        docs.path().join("houses.txt"),
        "The first house is the self.\n\nThe seventh house is partnership.",
    )?;

    let ollama = MockServer::start_async().await;
    let embed_mock = ollama
        .mock_async(|when, then| {
            when.method(POST).path("/api/embeddings");
            then.status(200).json_body(serde_json::json!({"embedding": [0.3, 0.4, 0.5]}));
        })
        .await;

    let embedder = OllamaEmbedder::new(Client::new(), ollama.base_url(), "nomic-embed-text");
    let builder = IndexBuilder::new(embedder, TextSplitter::default(), "nomic-embed-text");
    let output = out.path().join("vector_embedding.json");
    let count = builder.build_and_save(docs.path(), &output).await?;

    assert_eq!(count, 1);
    embed_mock.assert_hits_async(1).await;

    let loaded = VectorIndex::load(&output)?;
    assert_eq!(loaded.model, "nomic-embed-text");
    assert_eq!(loaded.dimensions, 3);
    assert_eq!(loaded.chunks[0].source, "houses.txt");
    Ok(())
}

#[tokio::test]
async fn test_missing_index_file_fails_before_any_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let err = VectorIndex::load(temp_dir.path().join("vector_embedding.json")).unwrap_err();

    assert!(matches!(err.root(), AstroError::VectorStoreError { .. }));
    assert!(err.recovery_suggestion().contains("astro-insight index"));
    Ok(())
}
