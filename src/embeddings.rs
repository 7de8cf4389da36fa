use anyhow::{anyhow, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Mutex;

/// Dimension of the sentence-embedding model. Vectors stored at ingestion
/// time and query vectors must both come from this model; the collection
/// schema is created with the same value.
pub const EMBEDDING_DIM: usize = 384;

/// Handle to the local sentence-embedding model (all-MiniLM-L6-v2, 384-dim).
///
/// The model is loaded once and reused; inference runs in-process with no
/// network calls after the initial model download.
pub struct EmbeddingGenerator {
    model: Mutex<TextEmbedding>,
}

impl EmbeddingGenerator {
    /// Load the embedding model. Any failure here is a startup failure
    /// for the invoking process.
    pub fn new() -> Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
        )
        .map_err(|e| anyhow!("Failed to load embedding model: {}", e))?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }

    pub fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()])?;
        embeddings
            .pop()
            .ok_or_else(|| anyhow!("Embedding model returned no vector"))
    }

    pub fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut model = self
            .model
            .lock()
            .map_err(|_| anyhow!("Embedding model lock poisoned"))?;

        let embeddings = model
            .embed(texts.to_vec(), None)
            .map_err(|e| anyhow!("Embedding failed: {}", e))?;

        for embedding in &embeddings {
            if embedding.len() != EMBEDDING_DIM {
                return Err(anyhow!(
                    "Generated embedding has wrong size: {} (expected {})",
                    embedding.len(),
                    EMBEDDING_DIM
                ));
            }
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Downloads the model on first run; opt in with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn test_identical_text_identical_vectors() {
        let embedder = EmbeddingGenerator::new().unwrap();
        let a = embedder.generate_embedding("The heart has four chambers.").unwrap();
        let b = embedder.generate_embedding("The heart has four chambers.").unwrap();
        assert_eq!(a.len(), EMBEDDING_DIM);
        assert_eq!(a, b);
    }
}
