use dotenv::dotenv;

use med_rag::config::Settings;
use med_rag::ingest::run_ingestion;

/// One-shot offline run that populates the vector index from `data/`.
/// Takes no command-line arguments.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let settings = Settings::from_env();
    run_ingestion(&settings).await
}
