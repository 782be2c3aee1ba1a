//! Command-line argument definitions

use clap::{Parser, Subcommand};

/// One-way file synchronizer for a remote document store
#[derive(Debug, Parser)]
#[command(name = "docsync", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold project config and ignore file, summarize the local tree
    Init,

    /// Store a session key for the project's document store
    Login {
        /// Session key value; prompted for when omitted
        #[arg(long)]
        session_key: Option<String>,
    },

    /// Show sync status of all files
    Status,

    /// List files on the remote
    ListRemote,

    /// Sync files to the remote
    Sync {
        /// Show what would be synced without actually syncing
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
