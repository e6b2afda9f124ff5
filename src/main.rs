//! spotlog CLI entry point
//!
//! Location diary - CLI + web app

use spotlog::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
