//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod serve;
pub mod spot;
pub mod status;
pub mod user;

use clap::{Parser, Subcommand};

/// Location diary: pin spots on a map, attach notes and photos
#[derive(Parser)]
#[command(name = "spotlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show store/server status
    Status(status::StatusArgs),

    /// View and manage spots
    Spot(spot::SpotArgs),

    /// Manage user accounts
    User(user::UserArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
        Commands::Spot(args) => spot::run(args),
        Commands::User(args) => user::run(args),
    }
}
