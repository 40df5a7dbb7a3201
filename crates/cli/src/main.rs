//! tsm CLI - scheduled tarsnap backups with weekly/monthly retention

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;
use tracing::Level;

mod cmd;

/// tsm - Tarsnap schedule manager
#[derive(Parser)]
#[command(name = "tsm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file
    #[arg(short = 'c', long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log debug output, including every tarsnap invocation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a nightly archive, then expire old ones (if ExpireBackups is set)
    Nightly,
    /// Create an adhoc archive (never expired)
    Adhoc,
    /// Show archives expiry would delete, without deleting anything
    ListExpired {
        /// Also show archives that would be kept
        #[arg(short, long)]
        all: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is reserved for reports
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    match cli.command {
        Commands::Nightly => cmd::nightly::run(&cli.config).await,
        Commands::Adhoc => cmd::adhoc::run(&cli.config).await,
        Commands::ListExpired { all } => cmd::list_expired::run(&cli.config, all).await,
    }
}
