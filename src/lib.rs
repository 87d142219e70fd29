pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ChatCompletionClient, IndexBuilder, OllamaEmbedder, TextSplitter, VectorIndex, VectorStoreRetriever};
pub use config::AppConfig;
pub use core::birth_chart::{generate_birth_chart, BirthChart, FixedPositions};
pub use core::chart::{Chart, ChartEngine};
pub use core::insight::InsightEngine;
pub use domain::model::{Effects, InsightResponse, Positions, UserData};
pub use utils::error::{AstroError, Result};
