//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Keel web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // Parse API keys from environment (comma-separated)
    let api_keys: Vec<String> = std::env::var("KEEL_API_KEYS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!(
            "   🔑 API keys: {} configured (KEEL_API_KEYS)",
            api_keys.len()
        );
        if api_keys.is_empty() {
            println!("      No keys set; every request will be rejected.");
            println!("      Set KEEL_API_KEYS or use --no-auth for local development.");
        }
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = keel_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    let static_dir_str = match static_dir {
        Some(p) => Some(
            p.to_str()
                .ok_or_else(|| anyhow::anyhow!("static_dir path must be valid UTF-8"))?,
        ),
        None => None,
    };
    keel_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}
