//! One-call query over a channel: filter, thread, aggregate.
//!
//! This is the surface a presentation layer talks to. It takes plain
//! parameters and returns plain data; nothing here reads UI state.

use chrono::NaiveDate;
use serde::Serialize;

use super::filter::{DateRange, DateSpan, FilterConfig, MatchCounts, apply_filters};
use super::stats::{
    DateBucket, Statistics, UserCount, compute_daily_counts, compute_statistics,
    compute_user_counts,
};
use super::threads::{SortOrder, Thread, reconstruct};
use crate::Message;
use crate::error::ValidationError;

/// Parameters of a channel query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub filter: FilterConfig,
    pub sort_order: SortOrder,
}

impl QueryParams {
    /// Creates parameters that select everything, newest root first.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.filter.date_range = range;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.filter.date_range.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.filter.date_range.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.filter = self.filter.with_search(text);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, query: impl Into<String>) -> Self {
        self.filter = self.filter.with_timestamp(query);
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }
}

/// Everything the presentation layer needs to render a channel view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub threads: Vec<Thread>,
    pub stats: Statistics,
    /// Zero-filled per-day counts over [`span`](Self::span).
    pub daily_counts: Vec<DateBucket>,
    pub user_counts: Vec<UserCount>,
    /// Date range that was applied.
    pub span: Option<DateSpan>,
    pub counts: MatchCounts,
    /// Non-fatal problem with the parameters, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationError>,
}

impl QueryResult {
    /// Returns `true` if no message survived the filters.
    pub fn is_empty(&self) -> bool {
        self.stats.message_count == 0
    }
}

/// Runs the filter pipeline, then thread reconstruction and aggregation.
///
/// A bad timestamp query does not fail the call: the predicate is skipped
/// and the problem is returned in [`QueryResult::validation`].
///
/// # Example
///
/// ```
/// use slackview::core::{QueryParams, SortOrder, query_threads};
/// use slackview::Message;
/// use chrono::{TimeZone, Utc};
///
/// let t0 = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
/// let messages = vec![Message::new(t0, "hello").with_user("U01")];
///
/// let result = query_threads(&messages, &QueryParams::new().with_sort_order(SortOrder::OldestFirst));
/// assert_eq!(result.threads.len(), 1);
/// assert_eq!(result.stats.unique_user_count, 1);
/// assert_eq!(result.daily_counts.len(), 1);
/// ```
pub fn query_threads(messages: &[Message], params: &QueryParams) -> QueryResult {
    let outcome = apply_filters(messages, &params.filter);

    let daily_counts = outcome
        .span
        .map(|span| compute_daily_counts(&outcome.messages, span.start, span.end))
        .unwrap_or_default();

    QueryResult {
        threads: reconstruct(&outcome.messages, params.sort_order),
        stats: compute_statistics(&outcome.messages),
        daily_counts,
        user_counts: compute_user_counts(&outcome.messages),
        span: outcome.span,
        counts: outcome.counts,
        validation: outcome.validation,
    }
}
