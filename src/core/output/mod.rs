//! Output format writers.
//!
//! This module provides writers for a [`QueryResult`](crate::core::QueryResult):
//! - [`write_text`] / [`to_text`] - human-readable statistics, daily series and threads
//! - [`write_json`] / [`to_json`] - the whole result as pretty JSON
//! - [`write_csv`] / [`to_csv`] - the posts-per-day series, for charting - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust
//! use slackview::core::output::to_text;
//! use slackview::core::{QueryParams, query_threads};
//!
//! let result = query_threads(&[], &QueryParams::new());
//! assert!(to_text(&result).contains("Basic Statistics"));
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
pub use text_writer::{to_text, write_text};
