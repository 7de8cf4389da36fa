use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::database::VectorDB;
use crate::embeddings::EmbeddingGenerator;
use crate::prompt::build_prompt;
use crate::providers::CompletionProvider;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("Retrieval failed: {0}")]
    Retrieval(String),
    #[error("Generation failed: {0}")]
    Generation(String),
}

/// A chunk returned from similarity search, with its payload unpacked.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub text: String,
    pub source: String,
    pub score: f32,
}

/// Seam over the retrieval side of the pipeline so the chat route can be
/// exercised against fakes in tests.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: u64) -> Result<Vec<RetrievedChunk>>;
}

/// Retriever bound to one Qdrant collection: embeds the query and runs a
/// top-k cosine similarity search.
pub struct VectorRetriever {
    embedder: Arc<EmbeddingGenerator>,
    vector_db: VectorDB,
    collection: String,
}

impl VectorRetriever {
    pub fn new(embedder: Arc<EmbeddingGenerator>, vector_db: VectorDB, collection: String) -> Self {
        Self {
            embedder,
            vector_db,
            collection,
        }
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, query: &str, top_k: u64) -> Result<Vec<RetrievedChunk>> {
        let query_embedding = self.embedder.generate_embedding(query)?;

        let results = self
            .vector_db
            .search_vectors(&self.collection, query_embedding, top_k)
            .await?;

        let chunks = results
            .into_iter()
            .filter_map(|(_, score, payload)| {
                let text = payload.get("text")?.as_str()?.to_string();
                let source = payload
                    .get("source")
                    .and_then(|s| s.as_str())
                    .unwrap_or_default()
                    .to_string();
                Some(RetrievedChunk { text, source, score })
            })
            .collect();

        Ok(chunks)
    }
}

/// The request-time pipeline: retrieve top-k chunks, stuff them into the
/// system prompt with the question, invoke the LLM once.
pub struct RagChain {
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn CompletionProvider>,
    top_k: u64,
}

impl RagChain {
    pub fn new(retriever: Arc<dyn Retriever>, llm: Arc<dyn CompletionProvider>, top_k: u64) -> Self {
        Self {
            retriever,
            llm,
            top_k,
        }
    }

    pub async fn answer(&self, question: &str) -> Result<String, RagError> {
        let chunks = self
            .retriever
            .retrieve(question, self.top_k)
            .await
            .map_err(|e| RagError::Retrieval(e.to_string()))?;

        log::debug!("Retrieved {} chunks for question", chunks.len());

        let contexts: Vec<String> = chunks.into_iter().map(|c| c.text).collect();
        let prompt = build_prompt(&contexts, question);

        self.llm
            .complete(&prompt)
            .await
            .map_err(|e| RagError::Generation(e.to_string()))
    }
}
