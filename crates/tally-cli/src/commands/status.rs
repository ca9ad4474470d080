//! Storage diagnostics command

use anyhow::Result;
use tally_core::config::StorageConfig;

use super::open_db;

pub fn cmd_status(config: &StorageConfig) -> Result<()> {
    let path = config.path();

    println!();
    println!("📊 Tally Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Database: {}", config.name);
    println!("   Path: {}", path.display());

    if let Ok(metadata) = std::fs::metadata(&path) {
        let size_kb = metadata.len() as f64 / 1024.0;
        if size_kb < 1024.0 {
            println!("   Size: {:.1} KB", size_kb);
        } else {
            println!("   Size: {:.1} MB", size_kb / 1024.0);
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    match open_db(config).and_then(|db| Ok(db.status()?)) {
        Ok(status) => {
            println!();
            println!("   ✅ Connected");
            println!("   Documents: {}", status.document_count);
            if status.collections.is_empty() {
                println!("   Collections: (none yet)");
            } else {
                println!("   Collections: {}", status.collections.join(", "));
            }
        }
        Err(e) => {
            println!();
            println!("   ❌ Error opening database: {:#}", e);
        }
    }

    Ok(())
}
