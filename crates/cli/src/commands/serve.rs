//! `aquadata serve` — Start the HTTP API server.

use anyhow::Result;
use aquadata_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<()> {
    let mut config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🌊 AquaData Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Dataset:   {}", config.dataset.path);
    println!("   Model:     {}", config.provider.model);

    aquadata_gateway::start(config)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
