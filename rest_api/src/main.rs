use anyhow::Result;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use rest_api::{load_server_config, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_server_config()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, shutting down.");
            let _ = shutdown_tx.send(());
        }
    });

    start_server(config, shutdown_rx).await
}
