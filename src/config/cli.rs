//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Scan Selector: choose the network scanner address
///
/// Shows and changes the scanner address in the scanner driver
/// configuration, optionally from a shared list of named presets.
#[derive(Debug, Parser)]
#[command(name = "scan-selector")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: watch)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Shared preset file
    #[arg(long, global = true, value_name = "PATH")]
    pub remote: Option<PathBuf>,

    /// Local copy of the shared preset file
    #[arg(long = "cache-file", global = true, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Per-user application data directory (primary configuration root)
    #[arg(long = "app-data-dir", global = true, value_name = "DIR")]
    pub app_data_dir: Option<PathBuf>,

    /// Per-user local cache directory (first fallback root)
    #[arg(long = "local-cache-dir", global = true, value_name = "DIR")]
    pub local_cache_dir: Option<PathBuf>,

    /// Temporary directory (last fallback root)
    #[arg(long = "temp-dir", global = true, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Address written into a newly created scanner configuration
    #[arg(long = "default-address", global = true, value_name = "ADDRESS")]
    pub default_address: Option<String>,

    /// Seconds between checks of the shared preset file
    #[arg(long = "poll-interval", global = true)]
    pub poll_interval: Option<u64>,

    /// Do not reload presets when the shared file changes
    #[arg(long = "no-auto-refresh", global = true)]
    pub no_auto_refresh: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for scan-selector
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Show the scanner configuration and current address
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List available presets
    Presets {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Save a scanner address
    Set {
        /// Dotted IPv4 address
        address: String,
    },

    /// Save the address of a preset
    Apply {
        /// Preset name
        name: String,
    },

    /// Interactive console that reloads presets when the shared file changes
    Watch,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the command to run, defaulting to [`Command::Watch`].
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Watch)
    }
}
