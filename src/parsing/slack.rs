//! Slack export records and their normalization.
//!
//! A channel file in an export batch is a JSON object with a `messages`
//! array. Each element carries at least `ts` and usually `text`; threaded
//! messages add `thread_ts`, human posts add `user`:
//!
//! ```json
//! {"messages": [
//!   {"ts": "1672567200.000100", "user": "U01", "text": "Anyone around?"},
//!   {"ts": "1672567500.000200", "thread_ts": "1672567200.000100", "user": "U02", "text": "Yes"}
//! ]}
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::Message;
use crate::error::{Result, SlackviewError};

/// System notice posted when someone joins a channel, matched at the start of the text.
static JOIN_NOTICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@U\w+> has joined the channel").unwrap());

/// Raw Slack message structure for deserialization.
///
/// Timestamps are kept as JSON values because exports write them both as
/// strings (`"1672567200.000100"`) and as bare numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    /// Epoch seconds, possibly with a fractional part
    #[serde(default)]
    pub ts: Option<Value>,
    /// Epoch seconds of the thread root
    #[serde(default)]
    pub thread_ts: Option<Value>,
    /// Author identifier
    #[serde(default)]
    pub user: Option<String>,
    /// Message body
    #[serde(default)]
    pub text: Option<String>,
}

/// Slack channel export wrapper.
#[derive(Debug, Deserialize)]
pub struct SlackExport {
    #[serde(default)]
    pub messages: Option<Vec<RawMessage>>,
}

/// Returns `true` if `text` is a "user joined the channel" system notice.
///
/// Only the start of the text is checked, so trailing words still match:
///
/// ```
/// use slackview::parsing::slack::is_join_notice;
///
/// assert!(is_join_notice("<@U123ABC> has joined the channel"));
/// assert!(is_join_notice("<@U123ABC> has joined the channel early"));
/// assert!(!is_join_notice("I have joined the channel discussion"));
/// ```
pub fn is_join_notice(text: &str) -> bool {
    JOIN_NOTICE.is_match(text)
}

/// Parses an epoch-seconds string such as `"1672567200.000100"`.
///
/// The fractional part is read digit by digit (up to nanoseconds) so two
/// distinct export timestamps never collapse through float rounding.
pub fn parse_epoch_seconds(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let (secs, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let secs: i64 = secs.parse().ok()?;

    // Digits beyond nanosecond precision are truncated.
    let nanos = frac
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(9)
        .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));

    // Before the epoch the fraction counts away from zero as well.
    match (negative, nanos) {
        (false, _) => DateTime::from_timestamp(secs, nanos),
        (true, 0) => DateTime::from_timestamp(-secs, 0),
        (true, _) => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
    }
}

/// Converts a raw JSON timestamp (string or number) to a `DateTime`.
pub fn parse_raw_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_epoch_seconds(s),
        Value::Number(n) => parse_epoch_seconds(&n.to_string()),
        _ => None,
    }
}

/// Parses a channel export document into its raw records.
///
/// A missing or null `messages` array yields no records.
pub fn parse_export(content: &str) -> std::result::Result<Vec<RawMessage>, serde_json::Error> {
    let export: SlackExport = serde_json::from_str(content)?;
    Ok(export.messages.unwrap_or_default())
}

/// Converts raw records into canonical messages.
///
/// - Join notices are dropped.
/// - `ts` must be present and parsable; otherwise the whole load fails with
///   [`SlackviewError::Configuration`].
/// - A repeated `ts` replaces the earlier record in place, so the output
///   holds each timestamp once and the last loaded copy wins.
pub fn normalize(channel: &str, raw: Vec<RawMessage>) -> Result<Vec<Message>> {
    let mut messages: Vec<Message> = Vec::with_capacity(raw.len());
    let mut positions: HashMap<DateTime<Utc>, usize> = HashMap::with_capacity(raw.len());

    for (index, record) in raw.into_iter().enumerate() {
        let text = record.text.unwrap_or_default();
        if is_join_notice(&text) {
            continue;
        }

        let ts = match record.ts.as_ref() {
            None | Some(Value::Null) => {
                return Err(SlackviewError::configuration(channel, index, "ts", "is missing"));
            }
            Some(value) => parse_raw_timestamp(value).ok_or_else(|| {
                SlackviewError::configuration(
                    channel,
                    index,
                    "ts",
                    format!("is not an epoch timestamp: {value}"),
                )
            })?,
        };

        let thread_ts = match record.thread_ts.as_ref() {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_raw_timestamp(value).ok_or_else(|| {
                SlackviewError::configuration(
                    channel,
                    index,
                    "thread_ts",
                    format!("is not an epoch timestamp: {value}"),
                )
            })?),
        };

        let message = Message {
            ts,
            thread_ts,
            user: record.user,
            text,
        };

        if let Some(&pos) = positions.get(&ts) {
            tracing::warn!(channel, %ts, "duplicate timestamp, keeping the later record");
            messages[pos] = message;
        } else {
            positions.insert(ts, messages.len());
            messages.push(message);
        }
    }

    Ok(messages)
}
