//! docsync CLI
//!
//! The command-line interface for the one-way document-store
//! synchronizer.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let cwd = std::env::current_dir()?;
    match cli.command {
        Some(Commands::Init) => commands::run_init(&cwd),
        Some(Commands::Login { session_key }) => commands::run_login(&cwd, session_key),
        Some(Commands::Status) => commands::run_status(&cwd),
        Some(Commands::ListRemote) => commands::run_list_remote(&cwd),
        Some(Commands::Sync { dry_run, yes }) => commands::run_sync(&cwd, dry_run, yes),
        None => {
            println!("{} One-way document-store synchronizer", "docsync".green().bold());
            println!();
            println!("Run {} for available commands.", "docsync --help".cyan());
            Ok(())
        }
    }
}
