pub mod birth_chart;
pub mod chart;
pub mod insight;
pub mod prompt;
pub mod report;

pub use crate::domain::model::{Effect, EffectKind, Effects, InsightResponse, Positions, UserData};
pub use crate::domain::ports::{CompletionClient, Embedder, PassageRetriever, PositionSource};
pub use crate::utils::error::Result;
