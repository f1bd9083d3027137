//! `folio serve` — Start the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use folio_config::AppConfig;

pub async fn run(host: &str, port: u16, data_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env().map_err(|e| format!("Failed to load config: {e}"))?;
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("Invalid listen address {host}:{port}: {e}"))?;

    println!("📜 folio");
    println!("   Listening: {addr}");
    println!("   Data dir:  {}", data_dir.display());

    folio_gateway::start(config, addr, data_dir).await?;

    Ok(())
}
