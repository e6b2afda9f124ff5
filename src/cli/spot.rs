//! Spot command handler
//!
//! View and manage stored spots directly, without a running server.

use crate::config::Config;
use crate::error::Result;
use crate::spot::{filter, group, SpotInput};
use crate::store::SpotStore;
use clap::{Args, Subcommand};

/// Spot command arguments
#[derive(Args)]
pub struct SpotArgs {
    #[command(subcommand)]
    pub command: Option<SpotCommand>,
}

/// Spot subcommands
#[derive(Subcommand)]
pub enum SpotCommand {
    /// List spots, grouped by coordinate
    List {
        /// Only show spots whose comment contains this text
        #[arg(long, short = 'f')]
        filter: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Write JSON output to a file (implies --json)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
    /// Show a specific spot
    Show {
        /// Spot ID (a unique prefix is enough)
        id: String,
    },
    /// Add a spot from the command line
    Add {
        /// Display title
        #[arg(long)]
        title: String,

        /// Short comment/tag
        #[arg(long, default_value = "")]
        comment: String,

        /// Long-form description
        #[arg(long)]
        description: Option<String>,

        /// Image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Latitude
        #[arg(long)]
        lat: f64,

        /// Longitude
        #[arg(long)]
        lng: f64,

        /// Owner user email (must exist)
        #[arg(long)]
        owner: String,
    },
    /// Delete a spot
    Delete {
        /// Spot ID (a unique prefix is enough)
        id: String,
    },
    /// Delete all spots
    Clear,
}

/// Run the spot command
pub fn run(args: SpotArgs) -> Result<()> {
    let config = Config::load()?;
    let command = args.command.unwrap_or(SpotCommand::List {
        filter: None,
        json: false,
        output: None,
    });

    match command {
        SpotCommand::List {
            filter,
            json,
            output,
        } => list_spots(&config, filter.as_deref(), json, output.as_deref()),
        SpotCommand::Show { id } => show_spot(&config, &id),
        SpotCommand::Add {
            title,
            comment,
            description,
            image_url,
            lat,
            lng,
            owner,
        } => add_spot(
            &config,
            SpotInput {
                title,
                comment,
                description,
                image_url,
                lat,
                lng,
            },
            &owner,
        ),
        SpotCommand::Delete { id } => delete_spot(&config, &id),
        SpotCommand::Clear => clear_spots(&config),
    }
}

/// List spots grouped by coordinate
fn list_spots(
    config: &Config,
    active_filter: Option<&str>,
    json: bool,
    output: Option<&str>,
) -> Result<()> {
    let store = SpotStore::load_from(config.spots_path()?)?;
    let shown = filter::filter(store.list(), active_filter);

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&shown)?)?;
        eprintln!("Output written to {}", path);
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No spots.");
        return Ok(());
    }

    let groups = group::group(&shown);
    println!("{} spots at {} locations:\n", shown.len(), groups.len());

    for g in &groups {
        println!("  ({:.4}, {:.4})", g.coordinate.lat, g.coordinate.lng);
        for s in &g.spots {
            let tag = if s.comment.is_empty() {
                String::new()
            } else {
                format!(" [{}]", s.comment)
            };
            println!("    {} - {}{}", &s.id[..8], s.title, tag);
        }
        println!();
    }

    Ok(())
}

/// Show a specific spot
fn show_spot(config: &Config, id: &str) -> Result<()> {
    let store = SpotStore::load_from(config.spots_path()?)?;

    // Find spot by partial ID match
    let spot = store
        .list()
        .iter()
        .find(|s| s.id.starts_with(id))
        .ok_or_else(|| crate::error::Error::Store(format!("Spot not found: {}", id)))?;

    println!("{}", spot.title);
    println!("ID: {}", spot.id);
    println!("Coordinates: ({}, {})", spot.latitude, spot.longitude);
    if !spot.comment.is_empty() {
        println!("Comment: {}", spot.comment);
    }
    if let Some(description) = &spot.description {
        println!("\n{}", description);
    }
    if let Some(url) = &spot.image_url {
        println!("\nImage: {}", url);
    }
    println!("\nCreated: {} by {}", spot.created_at, spot.owner_id);

    Ok(())
}

/// Add a spot directly to the store
fn add_spot(config: &Config, input: SpotInput, owner_email: &str) -> Result<()> {
    let users = crate::auth::users::UserStore::load_from(config.users_path()?)?;
    let owner = users.find(owner_email).ok_or_else(|| {
        crate::error::Error::InvalidInput(format!("No such user: {}", owner_email))
    })?;

    let mut store = SpotStore::load_from(config.spots_path()?)?;
    let spot = store.add(input, &owner.id)?;

    println!("Created spot: {} ({})", spot.title, spot.id);
    Ok(())
}

/// Delete a spot
fn delete_spot(config: &Config, id: &str) -> Result<()> {
    let mut store = SpotStore::load_from(config.spots_path()?)?;

    // Find spot by partial ID match
    let full_id = store
        .list()
        .iter()
        .find(|s| s.id.starts_with(id))
        .map(|s| s.id.clone())
        .ok_or_else(|| crate::error::Error::Store(format!("Spot not found: {}", id)))?;

    store.remove(&full_id)?;
    println!("Deleted spot: {}", full_id);
    Ok(())
}

/// Delete all spots
fn clear_spots(config: &Config) -> Result<()> {
    let mut store = SpotStore::load_from(config.spots_path()?)?;
    let count = store.clear()?;
    println!("Cleared {} spots.", count);
    Ok(())
}
