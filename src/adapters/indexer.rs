use crate::adapters::splitter::TextSplitter;
use crate::adapters::vector_store::{IndexedChunk, VectorIndex};
use crate::domain::ports::Embedder;
use crate::utils::error::{AstroError, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DOCUMENT_EXTENSIONS: [&str; 3] = ["txt", "md", "pdf"];

/// Reads a directory of text and PDF documents, chunks and embeds them into a [`VectorIndex`].
pub struct IndexBuilder<E: Embedder> {
    embedder: E,
    splitter: TextSplitter,
    model: String,
}

impl<E: Embedder> IndexBuilder<E> {
    pub fn new(embedder: E, splitter: TextSplitter, model: impl Into<String>) -> Self {
        Self {
            embedder,
            splitter,
            model: model.into(),
        }
    }

    pub async fn build(&self, documents_path: &Path) -> Result<VectorIndex> {
        let files = list_documents(documents_path)?;
        if files.is_empty() {
            return Err(AstroError::VectorStoreError {
                message: format!(
                    "no .txt, .md or .pdf documents found in {}",
                    documents_path.display()
                ),
            }
            .located());
        }

        let mut index = VectorIndex::new(&self.model);
        for file in &files {
            let text = load_document(file)?;
            let chunks = self.splitter.split(&text);
            let source = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            if chunks.is_empty() {
                tracing::warn!("⚠️ {} has no extractable text, skipping", source);
                continue;
            }
            tracing::info!("📄 {}: {} chunks", source, chunks.len());
            let embeddings = self.embedder.embed_batch(&chunks).await.located()?;

            for (text, embedding) in chunks.into_iter().zip(embeddings) {
                index.push(IndexedChunk {
                    source: source.clone(),
                    text,
                    embedding,
                })?;
            }
        }

        Ok(index)
    }

    /// Build and write the index. Returns the number of chunks stored.
    pub async fn build_and_save(&self, documents_path: &Path, output_path: &Path) -> Result<usize> {
        let start = Instant::now();

        let index = self.build(documents_path).await?;
        index.save(output_path)?;

        tracing::info!("✅ Vector embeddings saved to {}", output_path.display());
        tracing::info!("⏱️ Time taken for execution: {:.2} seconds", start.elapsed().as_secs_f64());
        Ok(index.len())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Plain text for one document. PDFs go through `pdf-extract`.
fn load_document(path: &Path) -> Result<String> {
    match extension(path).as_deref() {
        Some("pdf") => pdf_extract::extract_text(path).map_err(|e| {
            AstroError::DocumentError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
            .located()
        }),
        _ => fs::read_to_string(path).located(),
    }
}

/// Documents directly under `dir`, sorted by path.
fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).located()? {
        let path = entry.located()?.path();
        let is_document = path.is_file()
            && extension(&path)
                .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.as_str()))
                .unwrap_or(false);
        if is_document {
            files.push(path);
        } else {
            tracing::debug!("Skipping {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}
