//! Filter messages by date range, text and exact timestamp.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for running them over a channel's messages.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date range | [`with_date_range`](FilterConfig::with_date_range) | Messages posted on a date within the range |
//! | Text | [`with_search`](FilterConfig::with_search) | Case-insensitive substring of the body |
//! | Timestamp | [`with_timestamp`](FilterConfig::with_timestamp) | Exact `ts`, or replies in that thread |
//!
//! Predicates always run in that order, each narrowing the previous result.
//!
//! # Example
//!
//! ```
//! use slackview::core::filter::{DateRange, FilterConfig, apply_filters};
//! use slackview::Message;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> slackview::Result<()> {
//! let messages = vec![
//!     Message::new(Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap(), "Deploy done"),
//!     Message::new(Utc.with_ymd_and_hms(2023, 1, 5, 9, 0, 0).unwrap(), "deploy failed"),
//!     Message::new(Utc.with_ymd_and_hms(2023, 1, 5, 9, 30, 0).unwrap(), "lunch?"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_range(DateRange::new().with_start_str("2023-01-02")?)
//!     .with_search("DEPLOY");
//!
//! let outcome = apply_filters(&messages, &config);
//! assert_eq!(outcome.messages.len(), 1);
//! assert_eq!(outcome.messages[0].text, "deploy failed");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Missing range bounds default to the first/last date present in the input
//! - An empty search string disables the text predicate
//! - An unparsable timestamp query is reported in [`FilterOutcome::validation`]
//!   and the timestamp predicate is skipped

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{SlackviewError, ValidationError};
use crate::parsing::slack::parse_epoch_seconds;

/// Date-time layouts accepted by the timestamp search, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// An inclusive calendar-date range with optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included. Defaults to the earliest message date.
    pub start: Option<NaiveDate>,
    /// Last date included. Defaults to the latest message date.
    pub end: Option<NaiveDate>,
}

/// A [`DateRange`] with both bounds filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    /// First date included.
    pub start: NaiveDate,
    /// Last date included.
    pub end: NaiveDate,
}

impl DateSpan {
    /// Returns `true` if `date` lies within the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered (zero if `start > end`).
    pub fn num_days(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }
}

impl DateRange {
    /// Creates an open range (both bounds default to the data).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a closed range.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the start bound from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`SlackviewError::InvalidDate`] if the format is invalid.
    pub fn with_start_str(self, date_str: &str) -> Result<Self, SlackviewError> {
        Ok(self.with_start(parse_date(date_str)?))
    }

    /// Sets the end bound from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`SlackviewError::InvalidDate`] if the format is invalid.
    pub fn with_end_str(self, date_str: &str) -> Result<Self, SlackviewError> {
        Ok(self.with_end(parse_date(date_str)?))
    }

    /// Fills missing bounds from the min/max message dates.
    ///
    /// Returns `None` when a bound is missing and `messages` is empty.
    pub fn resolve(&self, messages: &[Message]) -> Option<DateSpan> {
        let start = self
            .start
            .or_else(|| messages.iter().map(Message::date).min())?;
        let end = self.end.or_else(|| messages.iter().map(Message::date).max())?;
        Some(DateSpan { start, end })
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, SlackviewError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| SlackviewError::invalid_date(date_str))
}

/// Parses a timestamp search query.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.f]` (also with `T`), `YYYY-MM-DD HH:MM`,
/// RFC 3339, a bare `YYYY-MM-DD` (midnight) and raw export timestamps such
/// as `1672567200.000100`. Values without an offset are taken as UTC.
///
/// ```
/// use slackview::core::filter::parse_timestamp_query;
/// use chrono::{TimeZone, Utc};
///
/// let expected = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
/// assert_eq!(parse_timestamp_query("2023-01-01 10:00:00").unwrap(), expected);
/// assert_eq!(parse_timestamp_query("1672567200").unwrap(), expected);
/// assert!(parse_timestamp_query("yesterday").is_err());
/// ```
pub fn parse_timestamp_query(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let query = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(query) {
        return Ok(dt.to_utc());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(query, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(query, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    // Raw export timestamps; short digit runs like "2023" are not epochs.
    let integer_part = query.split('.').next().unwrap_or_default();
    if integer_part.len() >= 9 {
        if let Some(dt) = parse_epoch_seconds(query) {
            return Ok(dt);
        }
    }

    Err(ValidationError::invalid_timestamp(input))
}

/// Configuration for the filter pipeline.
///
/// All predicates are optional; an empty config keeps every message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Calendar-date window.
    pub date_range: DateRange,

    /// Case-insensitive substring searched in the message body.
    pub search_text: Option<String>,

    /// Exact timestamp to look up (root `ts` or thread anchor).
    pub timestamp_query: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Sets the text search. Empty or whitespace-only text disables it.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Sets the timestamp search query (validated when filters run).
    #[must_use]
    pub fn with_timestamp(mut self, query: impl Into<String>) -> Self {
        self.timestamp_query = Some(query.into());
        self
    }

    /// Returns the search text if the text predicate is active.
    pub fn active_search(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Returns the timestamp query if the timestamp predicate is active.
    pub fn active_timestamp(&self) -> Option<&str> {
        self.timestamp_query
            .as_deref()
            .filter(|query| !query.trim().is_empty())
    }
}

/// Message counts after each pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    /// Messages fed into the pipeline.
    pub total: usize,
    /// Messages left after the date range.
    pub after_date: usize,
    /// Messages left after the text search, `None` if it was not applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_text: Option<usize>,
    /// Messages left after the timestamp search, `None` if it was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_timestamp: Option<usize>,
}

/// Result of [`apply_filters`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Surviving messages, in input order.
    pub messages: Vec<Message>,
    /// The date range actually applied, `None` for an empty input with open bounds.
    pub span: Option<DateSpan>,
    /// Per-stage counts.
    pub counts: MatchCounts,
    /// Set when the timestamp query could not be parsed.
    pub validation: Option<ValidationError>,
}

/// Keeps messages posted on a date inside `span`.
pub fn filter_by_date(messages: &[Message], span: DateSpan) -> Vec<Message> {
    messages
        .iter()
        .filter(|msg| span.contains(msg.date()))
        .cloned()
        .collect()
}

/// Keeps messages whose body contains `needle`, ignoring case.
pub fn filter_by_text(messages: &[Message], needle: &str) -> Vec<Message> {
    let needle = needle.to_lowercase();
    messages
        .iter()
        .filter(|msg| !msg.text.is_empty() && msg.text.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Keeps messages whose `ts` or `thread_ts` equals `ts`.
pub fn filter_by_timestamp(messages: &[Message], ts: DateTime<Utc>) -> Vec<Message> {
    messages
        .iter()
        .filter(|msg| msg.ts == ts || msg.thread_ts == Some(ts))
        .cloned()
        .collect()
}

/// Runs the date, text and timestamp predicates in order.
///
/// The pipeline is deterministic and preserves input order. Date bounds
/// left open are resolved against the full input.
pub fn apply_filters(messages: &[Message], config: &FilterConfig) -> FilterOutcome {
    let span = config.date_range.resolve(messages);
    let mut current = match span {
        Some(span) => filter_by_date(messages, span),
        None => Vec::new(),
    };

    let mut counts = MatchCounts {
        total: messages.len(),
        after_date: current.len(),
        ..MatchCounts::default()
    };

    if let Some(needle) = config.active_search() {
        current = filter_by_text(&current, needle);
        counts.after_text = Some(current.len());
    }

    let mut validation = None;
    if let Some(query) = config.active_timestamp() {
        match parse_timestamp_query(query) {
            Ok(ts) => {
                current = filter_by_timestamp(&current, ts);
                counts.after_timestamp = Some(current.len());
            }
            Err(e) => {
                tracing::debug!(query, "ignoring unparsable timestamp query");
                validation = Some(e);
            }
        }
    }

    FilterOutcome {
        messages: current,
        span,
        counts,
        validation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn msg(y: i32, mo: u32, d: u32, h: u32, text: &str) -> Message {
        Message::new(Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap(), text).with_user("U01")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Message> {
        vec![
            msg(2023, 1, 1, 10, "Happy new year"),
            msg(2023, 1, 2, 10, "Back to work"),
            msg(2023, 1, 3, 23, "late night deploy"),
        ]
    }

    #[test]
    fn test_open_range_keeps_everything() {
        let outcome = apply_filters(&sample(), &FilterConfig::new());
        assert_eq!(outcome.messages.len(), 3);
        assert_eq!(
            outcome.span,
            Some(DateSpan {
                start: date(2023, 1, 1),
                end: date(2023, 1, 3)
            })
        );
        assert!(outcome.validation.is_none());
    }

    #[test]
    fn test_date_range_is_inclusive_by_calendar_date() {
        let config = FilterConfig::new().with_date_range(DateRange::between(date(2023, 1, 2), date(2023, 1, 3)));
        let outcome = apply_filters(&sample(), &config);
        let texts: Vec<_> = outcome.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Back to work", "late night deploy"]);
    }

    #[test]
    fn test_text_search_case_insensitive() {
        let config = FilterConfig::new().with_search("DEPLOY");
        let outcome = apply_filters(&sample(), &config);
        assert_eq!(outcome.messages.len(), 1);
        assert_eq!(outcome.counts.after_text, Some(1));
    }

    #[test]
    fn test_text_search_empty_text_never_matches() {
        let messages = vec![msg(2023, 1, 1, 10, "")];
        assert!(filter_by_text(&messages, "a").is_empty());
    }

    #[test]
    fn test_blank_search_is_disabled() {
        let config = FilterConfig::new().with_search("   ");
        let outcome = apply_filters(&sample(), &config);
        assert_eq!(outcome.messages.len(), 3);
        assert_eq!(outcome.counts.after_text, None);
    }

    #[test]
    fn test_timestamp_search_matches_root_and_thread() {
        let root_ts = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        let other_root = Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap();
        let messages = vec![
            Message::new(root_ts, "root"),
            Message::new(root_ts + chrono::Duration::minutes(1), "reply").with_thread_ts(root_ts),
            Message::new(other_root, "elsewhere"),
            // Own ts equals the query but belongs to another thread
            Message::new(root_ts, "dup ts").with_thread_ts(other_root),
        ];

        let matched = filter_by_timestamp(&messages, root_ts);
        let texts: Vec<_> = matched.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["root", "reply", "dup ts"]);

        let config = FilterConfig::new().with_timestamp("2023-01-01 10:00:00");
        let outcome = apply_filters(&messages[..3], &config);
        let texts: Vec<_> = outcome.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["root", "reply"]);
    }

    #[test]
    fn test_invalid_timestamp_reports_and_skips() {
        let config = FilterConfig::new().with_timestamp("not a time");
        let outcome = apply_filters(&sample(), &config);
        assert_eq!(outcome.messages.len(), 3);
        assert_eq!(
            outcome.validation,
            Some(ValidationError::invalid_timestamp("not a time"))
        );
        assert_eq!(outcome.counts.after_timestamp, None);
    }

    #[test]
    fn test_empty_input_has_no_span() {
        let outcome = apply_filters(&[], &FilterConfig::new());
        assert!(outcome.messages.is_empty());
        assert!(outcome.span.is_none());
    }

    #[test]
    fn test_parse_timestamp_query_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp_query("2023-01-01 10:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp_query("2023-01-01T10:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp_query("2023-01-01T10:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp_query("2023-01-01T12:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp_query("2023-01-01 10:00").unwrap(), expected);
        assert_eq!(parse_timestamp_query(" 1672567200.000000 ").unwrap(), expected);
        assert_eq!(
            parse_timestamp_query("2023-01-01").unwrap(),
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_timestamp_query("2023").is_err());
        assert!(parse_timestamp_query("01/01/2023").is_err());
    }

    #[test]
    fn test_parse_timestamp_query_fractional() {
        let parsed = parse_timestamp_query("2023-01-01 10:00:00.000100").unwrap();
        assert_eq!(parsed, parse_epoch_seconds("1672567200.000100").unwrap());
    }

    #[test]
    fn test_invalid_date_bound() {
        let result = DateRange::new().with_start_str("01-01-2023");
        assert!(matches!(result, Err(SlackviewError::InvalidDate { .. })));
    }

    #[test]
    fn test_match_counts_serialize_applied_stages_only() {
        let outcome = apply_filters(&sample(), &FilterConfig::new().with_search("deploy"));
        let json = serde_json::to_value(outcome.counts).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["after_date"], 3);
        assert_eq!(json["after_text"], 1);
        assert!(json.get("after_timestamp").is_none());
    }

    #[test]
    fn test_span_num_days() {
        let span = DateSpan {
            start: date(2023, 1, 1),
            end: date(2023, 1, 3),
        };
        assert_eq!(span.num_days(), 3);
        let inverted = DateSpan {
            start: date(2023, 1, 3),
            end: date(2023, 1, 1),
        };
        assert_eq!(inverted.num_days(), 0);
    }
}
