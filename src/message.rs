//! Canonical message type for archived channel history.
//!
//! This module provides [`Message`], the normalized representation of one
//! record from a channel export. Raw records are converted into it by
//! [`normalize`](crate::parsing::slack::normalize).
//!
//! # Threads
//!
//! Every message is identified by its `ts`. A message whose `thread_ts` is
//! absent or equal to its own `ts` is a *root*; any other message is a
//! *reply* to the root whose `ts` equals its `thread_ts`.
//!
//! ```
//! use slackview::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let root_ts = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
//! let reply_ts = Utc.with_ymd_and_hms(2023, 1, 1, 10, 5, 0).unwrap();
//!
//! let root = Message::new(root_ts, "Anyone around?").with_user("U01");
//! let reply = Message::new(reply_ts, "Yes").with_user("U02").with_thread_ts(root_ts);
//!
//! assert!(root.is_root());
//! assert!(reply.is_reply());
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A normalized message from a channel archive.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `ts` | `DateTime<Utc>` | Unique identity and sort key within a channel |
/// | `thread_ts` | `Option<DateTime<Utc>>` | `ts` of the thread root, if threaded |
/// | `user` | `Option<String>` | Author identifier |
/// | `text` | `String` | Message body, markup left untouched |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was posted. Unique within a channel.
    pub ts: DateTime<Utc>,

    /// Root of the thread this message belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub thread_ts: Option<DateTime<Utc>>,

    /// Author identifier (e.g. `U012ABCDEF`).
    ///
    /// Bot and integration posts may carry no user.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub user: Option<String>,

    /// Message body. May contain Slack markup such as `<@U123>` mentions.
    #[serde(default)]
    pub text: String,
}

impl Message {
    /// Creates a root message with no author.
    pub fn new(ts: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            ts,
            thread_ts: None,
            user: None,
            text: text.into(),
        }
    }

    /// Builder method to set the thread root reference.
    #[must_use]
    pub fn with_thread_ts(mut self, thread_ts: DateTime<Utc>) -> Self {
        self.thread_ts = Some(thread_ts);
        self
    }

    /// Builder method to set the author.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Returns the author identifier, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the calendar date (UTC) the message was posted on.
    pub fn date(&self) -> NaiveDate {
        self.ts.date_naive()
    }

    /// Returns `true` if this message starts a thread (or is unthreaded).
    pub fn is_root(&self) -> bool {
        self.thread_ts.is_none_or(|thread_ts| thread_ts == self.ts)
    }

    /// Returns `true` if this message replies to another message's thread.
    pub fn is_reply(&self) -> bool {
        !self.is_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_unthreaded_is_root() {
        let msg = Message::new(at(10, 0), "hello");
        assert!(msg.is_root());
        assert!(!msg.is_reply());
    }

    #[test]
    fn test_self_anchored_is_root() {
        let msg = Message::new(at(10, 0), "thread starter").with_thread_ts(at(10, 0));
        assert!(msg.is_root());
    }

    #[test]
    fn test_reply() {
        let msg = Message::new(at(10, 5), "reply").with_thread_ts(at(10, 0));
        assert!(msg.is_reply());
    }

    #[test]
    fn test_date_is_utc_calendar_date() {
        let msg = Message::new(Utc.with_ymd_and_hms(2023, 3, 4, 23, 59, 59).unwrap(), "late");
        assert_eq!(msg.date(), NaiveDate::from_ymd_opt(2023, 3, 4).unwrap());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let msg = Message::new(at(10, 0), "hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("thread_ts"));
        assert!(!json.contains("user"));

        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
