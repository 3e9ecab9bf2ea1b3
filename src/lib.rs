//! # Slackview
//!
//! A read-only query engine for archived Slack channel exports.
//!
//! ## Overview
//!
//! An archive is a directory of export batches (`from_2021/`,
//! `from_2022-2023/`, ...), each holding one `<channel>_<suffix>.json` file
//! per channel. Slackview:
//!
//! - enumerates channels across all batches
//! - merges a channel's files into one message history
//! - normalizes raw records and drops "has joined the channel" notices
//! - filters by date range, text and exact timestamp
//! - rebuilds threads (roots with their replies)
//! - computes statistics and a zero-filled posts-per-day series
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slackview::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let archive = Archive::open(ArchiveConfig::new().with_root("dumps"));
//!
//!     for channel in archive.list_channels()? {
//!         println!("{channel}");
//!     }
//!
//!     let params = QueryParams::new()
//!         .with_search("deploy")
//!         .with_sort_order(SortOrder::OldestFirst);
//!     let result = archive.query("general", &params)?;
//!
//!     for thread in &result.threads {
//!         println!("{} ({} replies)", thread.root.text, thread.replies.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`archive`] - Batch discovery, loading, per-channel cache ([`Archive`](archive::Archive))
//! - [`parsing`] - Raw export records and [`normalize`](parsing::normalize)
//! - [`core`] - Filter pipeline, thread reconstruction, aggregation, output writers
//! - [`config`] - [`ArchiveConfig`](config::ArchiveConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`cli`] - CLI types (requires `cli` feature)
//! - [`error`] - Error types ([`SlackviewError`], [`ValidationError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SlackviewError, ValidationError};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use slackview::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{Result, SlackviewError, ValidationError};

    pub use crate::archive::{Archive, ArchiveIndex, load_messages};
    pub use crate::config::ArchiveConfig;
    pub use crate::parsing::{is_join_notice, normalize};

    pub use crate::core::filter::{DateRange, DateSpan, FilterConfig, apply_filters};
    pub use crate::core::query::{QueryParams, QueryResult, query_threads};
    pub use crate::core::stats::{DateBucket, Statistics, compute_daily_counts, compute_statistics};
    pub use crate::core::threads::{SortOrder, Thread, reconstruct};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
