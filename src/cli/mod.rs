//! CLI argument parsing for linkweight
//!
//! Global flags: --vault, --config, --format, --quiet, --verbose

pub mod config;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use linkweight_core::format::OutputFormat;
use std::path::PathBuf;

pub use config::ConfigCommands;
use parse::parse_format;

/// Linkweight - size graph nodes by the reach of their links
#[derive(Parser, Debug)]
#[command(name = "linkweight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault root directory (defaults to the current directory)
    #[arg(long, global = true, env = "LINKWEIGHT_VAULT")]
    pub vault: Option<PathBuf>,

    /// Configuration file (defaults to <vault>/.linkweight/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug", "linkweight_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve node sizes for a single pass
    Sizes {
        /// Node keys to size (defaults to every node in the vault)
        keys: Vec<String>,

        /// Only list nodes that receive a size
        #[arg(long)]
        assigned_only: bool,
    },

    /// Show the raw reachability weight of a node
    Weight {
        /// Node key (relative path, `.md` optional)
        key: String,
    },

    /// Explain whether a node is excluded from dynamic sizing
    Excluded {
        /// Node key (relative path, `.md` optional)
        key: String,
    },

    /// List every tag used in the vault
    Tags,

    /// Inspect or initialize the sizing configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Resize every node periodically until interrupted
    Watch {
        /// Stop after this many passes
        #[arg(long)]
        passes: Option<u64>,

        /// Refresh period in milliseconds (overrides refreshIntervalMs)
        #[arg(long, value_parser = clap::value_parser!(u64).range(10..))]
        interval_ms: Option<u64>,
    },
}
