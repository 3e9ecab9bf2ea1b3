//! Export record parsing.
//!
//! This module turns the raw JSON records of a channel export into
//! canonical [`Message`](crate::Message)s.

pub mod slack;

// Re-export commonly used items
pub use slack::{RawMessage, SlackExport, is_join_notice, normalize, parse_epoch_seconds};
