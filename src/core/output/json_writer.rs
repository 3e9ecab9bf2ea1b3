//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::core::query::QueryResult;
use crate::error::SlackviewError;

/// Serializes a query result as pretty-printed JSON.
///
/// # Format
/// ```json
/// {
///   "threads": [{"root": {...}, "replies": [...]}],
///   "stats": {"message_count": 3, "unique_user_count": 2, ...},
///   "daily_counts": [{"date": "2023-01-01", "count": 2}],
///   ...
/// }
/// ```
pub fn to_json(result: &QueryResult) -> Result<String, SlackviewError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Writes a query result to a JSON file.
pub fn write_json(result: &QueryResult, output_path: &str) -> Result<(), SlackviewError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
