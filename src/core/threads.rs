//! Thread reconstruction.
//!
//! Splits a filtered message set into root messages and the replies that
//! hang off them. Roots follow the requested [`SortOrder`]; replies inside a
//! thread are always oldest first.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;

/// Display order of root messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recent root first
    #[default]
    NewestFirst,
    /// Oldest root first
    OldestFirst,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::NewestFirst => write!(f, "Newest first"),
            SortOrder::OldestFirst => write!(f, "Oldest first"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], " ").trim() {
            "newest" | "newest first" | "desc" => Ok(SortOrder::NewestFirst),
            "oldest" | "oldest first" | "asc" => Ok(SortOrder::OldestFirst),
            _ => Err(format!(
                "Unknown sort order: '{}'. Expected one of: newest, oldest",
                s
            )),
        }
    }
}

/// A root message and its replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub root: Message,
    /// Replies in the filtered set, oldest first.
    pub replies: Vec<Message>,
}

impl Thread {
    /// Returns `true` if the root has at least one reply.
    pub fn has_replies(&self) -> bool {
        !self.replies.is_empty()
    }
}

/// Groups replies by the `ts` of the root they point at.
fn index_replies(messages: &[Message]) -> HashMap<DateTime<Utc>, Vec<&Message>> {
    let mut index: HashMap<DateTime<Utc>, Vec<&Message>> = HashMap::new();
    for msg in messages {
        if let Some(thread_ts) = msg.thread_ts.filter(|_| msg.is_reply()) {
            index.entry(thread_ts).or_default().push(msg);
        }
    }
    index
}

/// Builds threads from a filtered message set.
///
/// Every root is emitted, with or without replies. Replies whose root is
/// not in `messages` are left out; see [`orphaned_replies`].
///
/// # Example
///
/// ```
/// use slackview::core::threads::{SortOrder, reconstruct};
/// use slackview::Message;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let t0 = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
/// let messages = vec![
///     Message::new(t0, "question"),
///     Message::new(t0 + Duration::minutes(2), "second answer").with_thread_ts(t0),
///     Message::new(t0 + Duration::minutes(1), "first answer").with_thread_ts(t0),
///     Message::new(t0 + Duration::hours(1), "unrelated"),
/// ];
///
/// let threads = reconstruct(&messages, SortOrder::NewestFirst);
/// assert_eq!(threads[0].root.text, "unrelated");
/// assert_eq!(threads[1].replies[0].text, "first answer");
/// ```
pub fn reconstruct(messages: &[Message], order: SortOrder) -> Vec<Thread> {
    let mut replies = index_replies(messages);

    let mut roots: Vec<&Message> = messages.iter().filter(|msg| msg.is_root()).collect();
    match order {
        SortOrder::NewestFirst => roots.sort_by(|a, b| b.ts.cmp(&a.ts)),
        SortOrder::OldestFirst => roots.sort_by(|a, b| a.ts.cmp(&b.ts)),
    }

    roots
        .into_iter()
        .map(|root| {
            let mut thread_replies: Vec<Message> = replies
                .remove(&root.ts)
                .unwrap_or_default()
                .into_iter()
                .cloned()
                .collect();
            thread_replies.sort_by(|a, b| a.ts.cmp(&b.ts));
            Thread {
                root: root.clone(),
                replies: thread_replies,
            }
        })
        .collect()
}

/// Returns replies whose root is absent from `messages`, in input order.
pub fn orphaned_replies(messages: &[Message]) -> Vec<&Message> {
    let roots: std::collections::HashSet<DateTime<Utc>> = messages
        .iter()
        .filter(|msg| msg.is_root())
        .map(|msg| msg.ts)
        .collect();

    messages
        .iter()
        .filter(|msg| {
            msg.thread_ts
                .is_some_and(|thread_ts| msg.is_reply() && !roots.contains(&thread_ts))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(min: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap() + Duration::minutes(min)
    }

    fn sample() -> Vec<Message> {
        vec![
            Message::new(t(0), "root A").with_thread_ts(t(0)),
            Message::new(t(5), "A reply 2").with_thread_ts(t(0)),
            Message::new(t(1), "A reply 1").with_thread_ts(t(0)),
            Message::new(t(10), "root B"),
            Message::new(t(20), "orphan").with_thread_ts(t(-30)),
        ]
    }

    #[test]
    fn test_roots_newest_first() {
        let threads = reconstruct(&sample(), SortOrder::NewestFirst);
        let roots: Vec<_> = threads.iter().map(|t| t.root.text.as_str()).collect();
        assert_eq!(roots, vec!["root B", "root A"]);
    }

    #[test]
    fn test_roots_oldest_first() {
        let threads = reconstruct(&sample(), SortOrder::OldestFirst);
        let roots: Vec<_> = threads.iter().map(|t| t.root.text.as_str()).collect();
        assert_eq!(roots, vec!["root A", "root B"]);
    }

    #[test]
    fn test_replies_always_oldest_first() {
        for order in [SortOrder::NewestFirst, SortOrder::OldestFirst] {
            let threads = reconstruct(&sample(), order);
            let a = threads.iter().find(|t| t.root.text == "root A").unwrap();
            let replies: Vec<_> = a.replies.iter().map(|m| m.text.as_str()).collect();
            assert_eq!(replies, vec!["A reply 1", "A reply 2"]);
        }
    }

    #[test]
    fn test_root_without_replies_is_emitted() {
        let threads = reconstruct(&sample(), SortOrder::OldestFirst);
        let b = threads.iter().find(|t| t.root.text == "root B").unwrap();
        assert!(!b.has_replies());
    }

    #[test]
    fn test_orphans_are_excluded_and_listed() {
        let messages = sample();
        let threads = reconstruct(&messages, SortOrder::OldestFirst);
        assert!(
            threads
                .iter()
                .flat_map(|t| t.replies.iter().chain(std::iter::once(&t.root)))
                .all(|m| m.text != "orphan")
        );

        let orphans = orphaned_replies(&messages);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].text, "orphan");
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("newest".parse::<SortOrder>().unwrap(), SortOrder::NewestFirst);
        assert_eq!("Newest first".parse::<SortOrder>().unwrap(), SortOrder::NewestFirst);
        assert_eq!("oldest_first".parse::<SortOrder>().unwrap(), SortOrder::OldestFirst);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
