//! Server command implementation

use anyhow::Result;
use tally_core::config::StorageConfig;
use tally_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    storage: &StorageConfig,
    host: &str,
    port: u16,
    no_chat_history: bool,
) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if no_chat_history {
        config.persist_chat = false;
    }

    println!("🚀 Starting Tally web server...");
    println!("   Database: {} ({})", storage.name, storage.path().display());
    println!("   Listening: http://{}:{}", host, port);
    if config.allowed_origins.is_empty() {
        println!("   🌐 CORS: any origin");
    } else {
        println!("   🌐 CORS: {}", config.allowed_origins.join(", "));
    }
    if !config.persist_chat {
        println!("   💬 Chat history: not stored");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(storage)?;
    tally_server::serve_with_config(db, host, port, config).await?;

    Ok(())
}
