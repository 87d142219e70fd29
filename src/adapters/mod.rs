// Adapters layer: concrete implementations of the domain ports (HTTP services, vector index).

pub mod completion;
pub mod embedding;
pub mod indexer;
pub mod splitter;
pub mod vector_store;

pub use completion::ChatCompletionClient;
pub use embedding::OllamaEmbedder;
pub use indexer::IndexBuilder;
pub use splitter::TextSplitter;
pub use vector_store::{VectorIndex, VectorStoreRetriever};
