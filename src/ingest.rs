use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

use crate::config::Settings;
use crate::database::VectorDB;
use crate::document::load_pdf_files;
use crate::embeddings::EmbeddingGenerator;
use crate::splitter::TextSplitter;

/// Offline ingestion run: PDFs -> chunks -> embeddings -> Qdrant.
///
/// Re-running against an existing collection is safe (create-if-absent),
/// but a partially failed upsert is not rolled back.
pub async fn run_ingestion(settings: &Settings) -> Result<()> {
    let documents = load_pdf_files(Path::new(&settings.data_dir))?;
    log::info!(
        "Loaded {} PDF documents from {}",
        documents.len(),
        settings.data_dir
    );

    let splitter = TextSplitter::new(settings.chunk_size, settings.chunk_overlap);
    let chunks = splitter.split_documents(&documents);
    log::info!("Split into {} chunks", chunks.len());

    let embedder = EmbeddingGenerator::new()?;

    let vector_db = VectorDB::new(&settings.qdrant_url, settings.qdrant_api_key.as_deref()).await?;
    vector_db
        .create_collection(&settings.collection_name, settings.embedding_dim)
        .await?;

    if chunks.is_empty() {
        log::warn!(
            "No chunks to index; collection {} left empty",
            settings.collection_name
        );
        return Ok(());
    }

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts)?;

    let records = chunks
        .iter()
        .zip(embeddings)
        .map(|(chunk, vector)| {
            let mut payload = HashMap::new();
            payload.insert(
                "text".to_string(),
                serde_json::Value::String(chunk.text.clone()),
            );
            payload.insert(
                "source".to_string(),
                serde_json::Value::String(chunk.source.clone()),
            );
            if let Some(page) = chunk.page {
                payload.insert("page".to_string(), serde_json::Value::from(page));
            }
            (vector, payload)
        })
        .collect();

    let written = vector_db
        .upsert_vectors(&settings.collection_name, records)
        .await?;
    log::info!(
        "Upserted {} points into collection {}",
        written,
        settings.collection_name
    );

    Ok(())
}
