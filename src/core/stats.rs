//! Aggregate statistics over a filtered message set.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::Message;

/// Basic counts over a message set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub message_count: usize,
    /// Distinct authors; messages without a user are not counted.
    pub unique_user_count: usize,
    /// Earliest message date, `None` for an empty set.
    pub period_start: Option<NaiveDate>,
    /// Latest message date, `None` for an empty set.
    pub period_end: Option<NaiveDate>,
}

/// Number of posts on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub count: usize,
}

/// Number of posts by one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    pub user: String,
    pub count: usize,
}

/// Computes message count, distinct users and the covered period.
pub fn compute_statistics(messages: &[Message]) -> Statistics {
    let users: HashSet<&str> = messages.iter().filter_map(Message::user).collect();

    Statistics {
        message_count: messages.len(),
        unique_user_count: users.len(),
        period_start: messages.iter().map(Message::date).min(),
        period_end: messages.iter().map(Message::date).max(),
    }
}

/// Counts posts per day over every date from `start` to `end` inclusive.
///
/// Days without posts get a zero bucket, and messages outside the range
/// are ignored. An inverted range yields no buckets.
///
/// ```
/// use slackview::core::stats::compute_daily_counts;
/// use slackview::Message;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let messages = vec![
///     Message::new(Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap(), "a"),
///     Message::new(Utc.with_ymd_and_hms(2023, 1, 1, 17, 0, 0).unwrap(), "b"),
///     Message::new(Utc.with_ymd_and_hms(2023, 1, 3, 12, 0, 0).unwrap(), "c"),
/// ];
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
///
/// let counts: Vec<usize> = compute_daily_counts(&messages, start, end)
///     .iter()
///     .map(|b| b.count)
///     .collect();
/// assert_eq!(counts, vec![2, 0, 1]);
/// ```
pub fn compute_daily_counts(messages: &[Message], start: NaiveDate, end: NaiveDate) -> Vec<DateBucket> {
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for msg in messages {
        *per_day.entry(msg.date()).or_insert(0) += 1;
    }

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DateBucket {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Counts posts per author, most active first (ties by user id).
pub fn compute_user_counts(messages: &[Message]) -> Vec<UserCount> {
    let mut per_user: HashMap<&str, usize> = HashMap::new();
    for user in messages.iter().filter_map(Message::user) {
        *per_user.entry(user).or_insert(0) += 1;
    }

    let mut counts: Vec<UserCount> = per_user
        .into_iter()
        .map(|(user, count)| UserCount {
            user: user.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user.cmp(&b.user)));
    counts
}
