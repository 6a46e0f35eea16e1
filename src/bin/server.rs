use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};

use llm_talks::core::Config;
use llm_talks::server::start_server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting llm-talks web service...");

    if let Err(e) = start_server(config).await {
        error!("Server stopped: {e:#}");
        return Err(e);
    }

    Ok(())
}
