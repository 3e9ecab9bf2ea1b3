//! Plain-text output writer.

use std::fs;

use chrono::{DateTime, Utc};

use crate::Message;
use crate::core::query::QueryResult;
use crate::error::SlackviewError;

const SEPARATOR: &str = "---";
const REPLY_INDENT: &str = "    ";

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

fn push_message(out: &mut String, msg: &Message, indent: &str) {
    out.push_str(&format!(
        "{indent}{} - {}\n",
        msg.user().unwrap_or("unknown"),
        format_ts(msg.ts)
    ));
    for line in msg.text.lines() {
        out.push_str(indent);
        out.push_str(line);
        out.push('\n');
    }
}

/// Renders a query result as human-readable text.
///
/// # Layout
/// - Search result counts, when a search was applied
/// - Basic statistics and the covered period
/// - Posts per day, one `date  count` line each
/// - Threads: `user - timestamp`, the text, replies indented, `---` between threads
pub fn to_text(result: &QueryResult) -> String {
    let mut out = String::new();

    if let Some(n) = result.counts.after_text {
        out.push_str(&format!("Search results: {n} messages found.\n"));
    }
    if let Some(n) = result.counts.after_timestamp {
        out.push_str(&format!("Timestamp search results: {n} messages found.\n"));
    }

    let stats = &result.stats;
    out.push_str("Basic Statistics\n");
    out.push_str(&format!("  Messages:      {}\n", stats.message_count));
    out.push_str(&format!("  Unique users:  {}\n", stats.unique_user_count));
    if let (Some(start), Some(end)) = (stats.period_start, stats.period_end) {
        out.push_str(&format!("  Period:        {start} to {end}\n"));
    }

    if !result.daily_counts.is_empty() {
        out.push_str("\nPosts per Day\n");
        for bucket in &result.daily_counts {
            out.push_str(&format!("  {}  {}\n", bucket.date, bucket.count));
        }
    }

    if result.threads.is_empty() {
        out.push_str("\nNo messages match the current filters.\n");
        return out;
    }

    out.push('\n');
    for thread in &result.threads {
        push_message(&mut out, &thread.root, "");
        if thread.has_replies() {
            out.push_str(&format!("{REPLY_INDENT}[thread: {} replies]\n", thread.replies.len()));
            for reply in &thread.replies {
                push_message(&mut out, reply, REPLY_INDENT);
            }
        }
        out.push_str(SEPARATOR);
        out.push('\n');
    }

    out
}

/// Writes the text rendering to a file.
pub fn write_text(result: &QueryResult, output_path: &str) -> Result<(), SlackviewError> {
    fs::write(output_path, to_text(result))?;
    Ok(())
}
