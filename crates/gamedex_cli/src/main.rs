//! GameDex CLI
//!
//! Interactive catalog manager: search RAWG, keep a personal catalog,
//! and persist it to a remote catalog service.
//!
//! # Commands
//!
//! - `session` - Interactive catalog session (default)
//! - `search` - One-shot search, printing a single result page
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use gamedex_search::{SearchConfig, DEFAULT_SEARCH_URL};
use gamedex_sync_engine::{SyncConfig, DEFAULT_SERVER_URL};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// GameDex command-line catalog manager.
#[derive(Parser)]
#[command(name = "gamedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the remote catalog service
    #[arg(global = true, long, env = "GAMEDEX_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// RAWG API key
    #[arg(global = true, long, env = "RAWG_API_KEY", hide_env_values = true)]
    rawg_key: Option<String>,

    /// Base URL of the RAWG API
    #[arg(global = true, long, default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Request timeout in seconds
    #[arg(global = true, long, default_value = "30")]
    timeout: u64,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive catalog session
    Session,

    /// Search games and print one result page
    Search {
        /// Search text
        query: String,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let config =
            SearchConfig::new(&self.search_url).with_timeout(Duration::from_secs(self.timeout));
        match &self.rawg_key {
            Some(key) => config.with_api_key(key),
            None => config,
        }
    }

    fn sync_config(&self) -> SyncConfig {
        SyncConfig::new(&self.server).with_timeout(Duration::from_secs(self.timeout))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        None | Some(Commands::Session) => {
            commands::session::run(cli.search_config(), cli.sync_config()).await?;
        }
        Some(Commands::Search {
            query,
            page,
            format,
        }) => {
            commands::search::run(&cli.search_config(), query, *page, format).await?;
        }
        Some(Commands::Version) => {
            println!("GameDex CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
