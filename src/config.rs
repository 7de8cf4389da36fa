use std::env;

/// Runtime configuration shared by the chat server and the ingestion run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collection_name: String,
    pub embedding_dim: u64,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: u64,
    pub data_dir: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Self {
        // Get Qdrant connection from env or use local defaults
        let qdrant_url = env::var("QDRANT_URL")
            .unwrap_or_else(|_| "http://localhost:6333".to_string());

        // A missing key surfaces at the first authenticated call, not here
        let qdrant_api_key = env::var("QDRANT_API_KEY").ok();

        let ollama_url = env::var("OLLAMA_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());

        let ollama_model = env::var("OLLAMA_MODEL")
            .unwrap_or_else(|_| "llama3.2".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            qdrant_url,
            qdrant_api_key,
            collection_name: "med".to_string(),
            embedding_dim: 384,
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 3,
            data_dir: "data".to_string(),
            ollama_url,
            ollama_model,
            temperature: 0.5,
            max_tokens: 2048,
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_env();
        assert_eq!(settings.collection_name, "med");
        assert_eq!(settings.embedding_dim, 384);
        assert_eq!(settings.top_k, 3);
        assert!(settings.chunk_overlap < settings.chunk_size);
    }
}
