// Receipt Processor - Web Server

use anyhow::Result;
use receipt_processor::api::{init_tracing, serve};
use receipt_processor::{ReceiptProcessor, ServerConfig, VERSION};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    info!(version = VERSION, "Starting receipt processor");

    serve(config, ReceiptProcessor::new()).await
}
