use anyhow::Result;
use astro_insight::config::toml_config::API_KEY_ENV;
use astro_insight::utils::validation::Validate;
use astro_insight::{AppConfig, AstroError, ChatCompletionClient};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_full_config_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        r#"
[llm]
endpoint = "https://api.groq.com/openai/v1"
model = "llama3-70b-8192"
api_key = "gsk_from_file"
temperature = 0.2
timeout_seconds = 20

[embedding]
endpoint = "http://ollama.internal:11434"
model = "nomic-embed-text"

[vector_store]
path = "data/vector_embedding.json"
top_k = 3

[indexing]
documents_path = "data/knowledge_base"
chunk_size = 800
chunk_overlap = 100
"#
    )?;

    let config = AppConfig::from_file(file.path())?;
    config.validate()?;

    assert_eq!(config.llm.model, "llama3-70b-8192");
    assert_eq!(config.llm.timeout_seconds, 20);
    assert_eq!(config.embedding.endpoint, "http://ollama.internal:11434");
    assert_eq!(config.vector_store.top_k, 3);
    assert_eq!(config.indexing.chunk_size, 800);
    assert_eq!(config.resolve_api_key()?, "gsk_from_file");
    Ok(())
}

#[test]
fn test_explicit_missing_config_file_is_io_error() {
    let err = AppConfig::load(Some("definitely/not/here/astro-insight.toml")).unwrap_err();
    assert!(matches!(err, AstroError::IoError(_)));
}

#[test]
fn test_invalid_endpoint_fails_validation() -> Result<()> {
    let config = AppConfig::from_toml_str(
        r#"
[embedding]
endpoint = "localhost:11434"
"#,
    )?;

    let err = config.validate().unwrap_err();
    match err {
        AstroError::InvalidConfigValueError { field, .. } => {
            assert_eq!(field, "embedding.endpoint")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

// Environment variables are process-wide, so every API-key-from-env case lives in this one test.
#[test]
fn test_api_key_from_environment() -> Result<()> {
    std::env::set_var("ASTRO_INSIGHT_TEST_KEY", "gsk_substituted");
    let config = AppConfig::from_toml_str(
        r#"
[llm]
api_key = "${ASTRO_INSIGHT_TEST_KEY}"
"#,
    )?;
    assert_eq!(config.llm.api_key.as_deref(), Some("gsk_substituted"));
    std::env::remove_var("ASTRO_INSIGHT_TEST_KEY");

    let previous = std::env::var(API_KEY_ENV).ok();

    std::env::set_var(API_KEY_ENV, "gsk_env");
    assert_eq!(AppConfig::default().resolve_api_key()?, "gsk_env");

    std::env::remove_var(API_KEY_ENV);
    let err = AppConfig::default().resolve_api_key().unwrap_err();
    assert!(matches!(err.root(), AstroError::MissingConfigError { .. }));

    let err = ChatCompletionClient::from_config(&AppConfig::default())
        .err()
        .expect("client without an API key must not build");
    assert!(err.to_string().contains(API_KEY_ENV));

    if let Some(previous) = previous {
        std::env::set_var(API_KEY_ENV, previous);
    }
    Ok(())
}
