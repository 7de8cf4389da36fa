pub mod api;
pub mod config;
pub mod database;
pub mod document;
pub mod embeddings;
pub mod ingest;
pub mod prompt;
pub mod providers;
pub mod rag;
pub mod splitter;

// Re-export commonly used items
pub use config::Settings;
pub use embeddings::EmbeddingGenerator;
pub use rag::RagChain;
