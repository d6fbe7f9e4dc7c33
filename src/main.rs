use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vocommand::llm::{LlmInterpreter, LlmSettings};
use vocommand::server::Server;
use vocommand::storage::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = LlmSettings::from_env();
    if !settings.is_configured() {
        tracing::warn!(
            "no generative backend configured; unmatched phrases will resolve to errors"
        );
    }
    let interpreter = Arc::new(LlmInterpreter::new(settings)?);
    let store = Arc::new(MemoryStore::new());

    let addr = std::env::var("VOCOMMAND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let mut server = Server::bind(&addr, store.clone(), store, interpreter).await?;
    tracing::info!(addr = %server.addr(), "vocommand listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown()?;
    Ok(())
}
