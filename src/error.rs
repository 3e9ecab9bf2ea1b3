//! Unified error types for slackview.
//!
//! This module provides a single [`SlackviewError`] enum that covers every
//! failure the engine can surface, plus [`ValidationError`] for the
//! recoverable problems that are reported alongside a result instead of
//! aborting it.
//!
//! # Error Taxonomy
//!
//! | Kind | Type | Effect |
//! |------|------|--------|
//! | Malformed archive record | [`SlackviewError::Configuration`] | Blocks the load |
//! | Unparsable timestamp query | [`ValidationError`] | Reported, predicate skipped |
//! | Empty channel / no matches | not an error | [`QueryResult::is_empty`](crate::core::QueryResult::is_empty) |
//! | Channel missing from a batch | not an error | Batch contributes nothing |

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A specialized [`Result`] type for slackview operations.
///
/// # Example
///
/// ```rust
/// use slackview::error::Result;
/// use slackview::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SlackviewError>;

/// The error type for all slackview operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlackviewError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the archive root does not exist or
    /// cannot be listed. Unreadable batch directories are skipped instead.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An archive file could not be read as a Slack channel export.
    #[error("Failed to parse export for channel '{channel}' (file: {}): {source}", path.display())]
    Parse {
        /// Channel being loaded
        channel: String,
        /// The offending file
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A loaded record is missing a canonical field or carries an
    /// unparsable value in it.
    ///
    /// This signals a malformed archive rather than an empty channel and is
    /// not recoverable by retrying.
    #[error("Malformed record #{index} in channel '{channel}': field '{field}' {reason}")]
    Configuration {
        /// Channel being normalized
        channel: String,
        /// Position of the record in the merged load order
        index: usize,
        /// The canonical field at fault (`ts` or `thread_ts`)
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A query parameter failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid date format in a date-range bound.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An output format was requested that cannot be produced.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format kind that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The requested channel is not present in any batch.
    #[error("Unknown channel '{0}'")]
    UnknownChannel(String),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// A recoverable problem with a query parameter.
///
/// Returned inside a [`QueryResult`](crate::core::QueryResult) so the caller
/// can show it next to the (otherwise intact) results.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ValidationError {
    /// The timestamp search string is not a recognizable date-time.
    #[error("Invalid timestamp '{input}'. Expected format: {expected}")]
    InvalidTimestamp {
        /// The rejected query
        input: String,
        /// Expected format description
        expected: &'static str,
    },
}

impl From<std::string::FromUtf8Error> for SlackviewError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        SlackviewError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SlackviewError {
    /// Creates a parse error for a channel export file.
    pub fn parse(channel: impl Into<String>, path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SlackviewError::Parse {
            channel: channel.into(),
            path: path.into(),
            source,
        }
    }

    /// Creates a configuration error for a malformed record.
    pub fn configuration(
        channel: impl Into<String>,
        index: usize,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        SlackviewError::Configuration {
            channel: channel.into(),
            index,
            field,
            reason: reason.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        SlackviewError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        SlackviewError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, SlackviewError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, SlackviewError::Parse { .. })
    }

    /// Returns `true` if this is a malformed-archive error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SlackviewError::Configuration { .. })
    }

    /// Returns `true` if this is a query validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, SlackviewError::Validation(_))
    }

    /// Returns `true` if this is an invalid date error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, SlackviewError::InvalidDate { .. })
    }
}

impl ValidationError {
    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        ValidationError::InvalidTimestamp {
            input: input.into(),
            expected: "YYYY-MM-DD HH:MM:SS",
        }
    }
}
