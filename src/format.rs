//! Output format selection.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks.
//!
//! # Example
//!
//! ```rust
//! # fn example() -> slackview::Result<()> {
//! use slackview::format::{OutputFormat, to_format_string};
//! use slackview::core::{QueryParams, query_threads};
//!
//! let result = query_threads(&[], &QueryParams::new());
//! let json = to_format_string(&result, OutputFormat::Json)?;
//! assert!(json.contains("\"threads\""));
//!
//! let format = OutputFormat::from_path("daily.csv")?;
//! assert_eq!(format, OutputFormat::Csv);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::core::query::QueryResult;
use crate::error::SlackviewError;

/// Output format for query results.
///
/// - [`Text`](OutputFormat::Text) - statistics, daily series and threads for reading
/// - [`Json`](OutputFormat::Json) - the complete result, for other tools
/// - [`Csv`](OutputFormat::Csv) - the posts-per-day series, for charting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,

    /// Pretty-printed JSON of the whole result
    Json,

    /// Semicolon-delimited `Date;Count` rows
    Csv,
}

impl OutputFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "csv"]
    }

    /// Detects format from a file path based on extension.
    ///
    /// The CLI uses this when `--output` is given without `--format`.
    pub fn from_path(path: &str) -> Result<Self, SlackviewError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(SlackviewError::invalid_format(
                "output",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: txt, json, csv",
                    ext
                ),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

#[cfg(not(feature = "csv-output"))]
fn csv_disabled() -> SlackviewError {
    SlackviewError::invalid_format(
        "output",
        "Output format CSV requires the 'csv-output' feature to be enabled",
    )
}

/// Writes a query result to a file in the specified format.
pub fn write_to_format(
    result: &QueryResult,
    path: &str,
    format: OutputFormat,
) -> Result<(), SlackviewError> {
    match format {
        OutputFormat::Text => crate::core::output::write_text(result, path),
        OutputFormat::Json => crate::core::output::write_json(result, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(result, path),
        #[cfg(not(feature = "csv-output"))]
        OutputFormat::Csv => Err(csv_disabled()),
    }
}

/// Renders a query result as a string in the specified format.
pub fn to_format_string(result: &QueryResult, format: OutputFormat) -> Result<String, SlackviewError> {
    match format {
        OutputFormat::Text => Ok(crate::core::output::to_text(result)),
        OutputFormat::Json => crate::core::output::to_json(result),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(result),
        #[cfg(not(feature = "csv-output"))]
        OutputFormat::Csv => Err(csv_disabled()),
    }
}
