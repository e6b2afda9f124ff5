//! User command handler
//!
//! Create and list user accounts. There is no self-service signup; accounts
//! are provisioned from the command line.

use crate::auth::users::UserStore;
use crate::auth::Role;
use crate::config::Config;
use crate::error::Result;
use clap::{Args, Subcommand};

/// User command arguments
#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a user account
    Add {
        /// Email address (login name)
        email: String,

        /// Password
        password: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Create a read-only account
        #[arg(long)]
        viewer: bool,
    },
    /// List accounts
    List,
}

/// Run the user command
pub fn run(args: UserArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = UserStore::load_from(config.users_path()?)?;

    match args.command {
        UserCommand::Add {
            email,
            password,
            name,
            viewer,
        } => {
            let role = if viewer { Role::Viewer } else { Role::Editor };
            let user = store.add(&email, &password, name, role)?;
            println!("Created user: {} ({})", user.email, user.role);
        }
        UserCommand::List => {
            if store.is_empty() {
                println!("No users.");
                return Ok(());
            }
            for user in store.list() {
                let name = user.name.as_deref().unwrap_or("-");
                println!("  {}  {}  ({})", user.email, name, user.role);
            }
        }
    }

    Ok(())
}
