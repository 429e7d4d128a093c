//! Command-line surface.

use clap::{Parser, Subcommand};

use crate::state::AppState;

mod forum;
mod products;
mod session;

pub use forum::ForumCommand;
pub use products::ProductsCommand;
pub use session::SessionCommand;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "Storefront client - community forum and product administration"
)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "API_URL", global = true)]
    pub api_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stored credentials
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// Community forum
    Forum {
        #[command(subcommand)]
        command: ForumCommand,
    },
    /// Product administration
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },
}

pub async fn run(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::Session { command } => session::run(command, state).await,
        Command::Forum { command } => forum::run(command, state).await,
        Command::Products { command } => products::run(command, state).await,
    }
}
