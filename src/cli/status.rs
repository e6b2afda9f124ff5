//! Status command handler
//!
//! Shows local store statistics and, optionally, the running server.

use crate::config::Config;
use crate::error::Result;
use crate::spot::filter::suggestions;
use crate::store::SpotStore;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    // Check server status if requested
    if args.server {
        check_server_status(&config).await;
    }

    let store = SpotStore::load_from(config.spots_path()?)?;
    let users = crate::auth::users::UserStore::load_from(config.users_path()?)?;

    println!("spotlog v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Data dir: {}", config.data_dir()?.display());
    println!("Spots: {}", store.len());
    println!("Users: {}", users.len());

    let top = suggestions(store.list());
    if !top.is_empty() {
        println!();
        println!("Top tags:");
        for s in top {
            println!("  {:3}  {}", s.count, s.tag);
        }
    }

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(body) = response.text().await {
                    if let Ok(status) = serde_json::from_str::<serde_json::Value>(&body) {
                        if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                            println!("  Version: {}", version);
                        }
                        if let Some(spots) = status.get("spots").and_then(|v| v.as_u64()) {
                            println!("  Spots: {}", spots);
                        }
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
