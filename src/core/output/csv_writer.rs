//! CSV output writer for the posts-per-day series.

use std::fs::File;

use crate::core::query::QueryResult;
use crate::core::stats::DateBucket;
use crate::error::SlackviewError;

fn write_buckets<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    buckets: &[DateBucket],
) -> Result<(), SlackviewError> {
    writer.write_record(["Date", "Count"])?;
    for bucket in buckets {
        writer.write_record([bucket.date.to_string(), bucket.count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders the daily series of a query result as CSV.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Date`, `Count`
/// - One row per calendar date in the applied range, zero days included
pub fn to_csv(result: &QueryResult) -> Result<String, SlackviewError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    write_buckets(&mut writer, &result.daily_counts)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| SlackviewError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes the daily series of a query result to a CSV file.
pub fn write_csv(result: &QueryResult, output_path: &str) -> Result<(), SlackviewError> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);
    write_buckets(&mut writer, &result.daily_counts)
}
