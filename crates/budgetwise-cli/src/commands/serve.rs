//! Server command implementation

use std::path::Path;

use anyhow::Result;
use budgetwise_core::Config;

use super::load_snapshot;

pub async fn cmd_serve(snapshot_path: &Path, config: Config, host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting Budgetwise web server...");
    println!("   Listening: http://{}:{}", host, port);

    // Without a snapshot file the server starts empty; clients upload one with PUT /api/snapshot
    let snapshot = if snapshot_path.exists() {
        println!("   Snapshot: {}", snapshot_path.display());
        Some(load_snapshot(snapshot_path)?)
    } else {
        println!("   Snapshot: none (upload with PUT /api/snapshot)");
        None
    };
    println!("   Currency: {}", config.currency());
    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = budgetwise_server::ServerConfig {
        allowed_origins: vec![],
    };
    budgetwise_server::serve_with_config(snapshot, config, host, port, server_config).await?;

    Ok(())
}
