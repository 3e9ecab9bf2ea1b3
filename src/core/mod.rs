//! Core query engine for slackview.
//!
//! This module contains:
//! - [`filter`] - Date-range, text and timestamp predicates
//! - [`threads`] - Root/reply reconstruction
//! - [`stats`] - Counts, per-day and per-user series
//! - [`query`] - The combined query used by presentation layers
//! - [`output`] - Text, JSON and CSV writers
//!
//! # Quick Start
//!
//! ```rust
//! use slackview::core::{
//!     DateRange, FilterConfig, QueryParams, SortOrder,
//!     apply_filters, compute_daily_counts, query_threads, reconstruct,
//! };
//! ```

pub mod filter;
pub mod output;
pub mod query;
pub mod stats;
pub mod threads;

// Re-export main types for convenience
pub use filter::{DateRange, DateSpan, FilterConfig, FilterOutcome, MatchCounts, apply_filters};
pub use query::{QueryParams, QueryResult, query_threads};
pub use stats::{
    DateBucket, Statistics, UserCount, compute_daily_counts, compute_statistics,
    compute_user_counts,
};
pub use threads::{SortOrder, Thread, orphaned_replies, reconstruct};

// Re-export Message from the crate root
pub use crate::Message;

pub use output::{to_json, to_text, write_json, write_text};
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
