use clap::Parser;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use med_rag::api::{create_router, AppState};
use med_rag::config::Settings;
use med_rag::database::VectorDB;
use med_rag::embeddings::EmbeddingGenerator;
use med_rag::providers::OllamaProvider;
use med_rag::rag::{RagChain, VectorRetriever};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::from_env();
    let port = args.port.unwrap_or(settings.port);

    // Expensive clients are constructed once here and shared across requests
    let embedder = Arc::new(EmbeddingGenerator::new()?);

    let vector_db = VectorDB::new(&settings.qdrant_url, settings.qdrant_api_key.as_deref()).await?;

    let retriever = Arc::new(VectorRetriever::new(
        embedder,
        vector_db,
        settings.collection_name.clone(),
    ));
    let llm = Arc::new(OllamaProvider::new(&settings));
    let chain = RagChain::new(retriever, llm, settings.top_k);

    let app = create_router(AppState {
        chain: Arc::new(chain),
    });

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Chat service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
