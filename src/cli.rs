//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level arguments (archive root, verbosity)
//! - [`Command`] - `channels` and `show` subcommands
//! - [`Order`] / [`Format`] - value enums mapped onto library types

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_ROOT;
use crate::core::SortOrder;
use crate::format::OutputFormat;

/// Browse archived Slack channel exports: list channels, filter by date,
/// text or timestamp, and print statistics with reconstructed threads.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackview")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackview channels
    slackview --root /srv/dumps show general
    slackview show general --from 2023-01-01 --to 2023-01-31 --order oldest
    slackview show general --search deploy
    slackview show general --ts \"2023-01-01 10:00:00\"
    slackview show general -o daily.csv")]
pub struct Args {
    /// Directory containing the from_* export batches
    #[arg(long, global = true, env = "SLACKVIEW_ARCHIVE", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Log debug details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every channel found in the archive
    Channels,

    /// Show statistics, posts per day and threads for one channel
    Show(ShowArgs),
}

/// Arguments of `show`.
#[derive(clap::Args, Debug, Clone)]
pub struct ShowArgs {
    /// Channel to display
    pub channel: String,

    /// First date to include (YYYY-MM-DD, default: earliest message)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last date to include (YYYY-MM-DD, default: latest message)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Case-insensitive text search
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact timestamp search (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_name = "TIMESTAMP")]
    pub ts: Option<String>,

    /// Root message order
    #[arg(long, value_enum, default_value = "newest")]
    pub order: Order,

    /// Output format (default: taken from the --output extension, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,
}

/// Root message order as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Order {
    /// Newest root first
    #[value(alias = "newest-first")]
    Newest,
    /// Oldest root first
    #[value(alias = "oldest-first")]
    Oldest,
}

impl From<Order> for SortOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Newest => SortOrder::NewestFirst,
            Order::Oldest => SortOrder::OldestFirst,
        }
    }
}

/// Output format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable text
    #[value(alias = "txt")]
    Text,
    /// Full result as JSON
    Json,
    /// Posts per day as CSV
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
        }
    }
}
