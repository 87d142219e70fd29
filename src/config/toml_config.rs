use crate::adapters::splitter::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::adapters::vector_store::DEFAULT_TOP_K;
use crate::utils::error::{AstroError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_CONFIG_FILE: &str = "astro-insight.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub vector_store: VectorStoreConfig,
    pub indexing: IndexingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API; `/chat/completions` is appended.
    pub endpoint: String,
    pub model: String,
    /// Falls back to `GROQ_API_KEY` when unset.
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            model: "llama3-8b-8192".to_string(),
            api_key: None,
            temperature: None,
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Ollama server URL.
    pub endpoint: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    pub path: String,
    pub top_k: usize,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            path: "vector_embedding.json".to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    pub documents_path: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            documents_path: "knowledge_base".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AstroError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AstroError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Explicit path must exist; otherwise use `astro-insight.toml` if present, else defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The configured key, or `GROQ_API_KEY` from the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        let from_config = self
            .llm
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"));

        match from_config {
            Some(key) => Ok(key.to_string()),
            None => std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    AstroError::MissingConfigError {
                        field: API_KEY_ENV.to_string(),
                    }
                    .located()
                }),
        }
    }
}

/// 替換環境變數 (例如 ${GROQ_API_KEY})；未設定的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("llm.endpoint", &self.llm.endpoint)?;
        validate_non_empty_string("llm.model", &self.llm.model)?;
        if let Some(temperature) = self.llm.temperature {
            validate_range("llm.temperature", temperature, 0.0, 2.0)?;
        }
        validate_positive_number("llm.timeout_seconds", self.llm.timeout_seconds as usize, 1)?;

        validate_url("embedding.endpoint", &self.embedding.endpoint)?;
        validate_non_empty_string("embedding.model", &self.embedding.model)?;

        validate_path("vector_store.path", &self.vector_store.path)?;
        validate_positive_number("vector_store.top_k", self.vector_store.top_k, 1)?;

        validate_path("indexing.documents_path", &self.indexing.documents_path)?;
        validate_positive_number("indexing.chunk_size", self.indexing.chunk_size, 1)?;
        if self.indexing.chunk_overlap >= self.indexing.chunk_size {
            return Err(AstroError::InvalidConfigValueError {
                field: "indexing.chunk_overlap".to_string(),
                value: self.indexing.chunk_overlap.to_string(),
                reason: "Overlap must be smaller than chunk_size".to_string(),
            });
        }

        Ok(())
    }
}
