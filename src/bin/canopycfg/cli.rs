use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "canopycfg",
    version,
    about = "Embedded nested config store with dotted-path access and snapshot persistence",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create a store root and write the initial snapshot.
    Init {
        #[arg(long)]
        path: PathBuf,
        /// JSON file with the default tree (omitted = empty tree).
        #[arg(long)]
        defaults: Option<PathBuf>,
        /// Pretty-print the JSON payload inside the snapshot.
        #[arg(long)]
        pretty: bool,
    },
    /// Print snapshot header info (version, flags, payload, CRC).
    Status {
        #[arg(long)]
        path: PathBuf,
    },
    /// Dump the whole current tree as JSON.
    Show {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Read one value by dotted path.
    Get {
        #[arg(long)]
        path: PathBuf,
        /// Dotted path, e.g. security.passwordPolicy.minLength
        #[arg(long)]
        key: String,
    },
    /// Stage one value and commit it. The value is parsed as JSON;
    /// a bare word is taken as a string.
    Set {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        key: String,
        #[arg(long)]
        value: String,
    },
    /// Restore the defaults and persist them.
    Reset {
        #[arg(long)]
        path: PathBuf,
        /// JSON file with the default tree (omitted = empty tree).
        #[arg(long)]
        defaults: Option<PathBuf>,
    },
}
