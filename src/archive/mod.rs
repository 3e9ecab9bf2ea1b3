//! Archive discovery, loading and caching.
//!
//! - [`ArchiveIndex`] - enumerates batches and channels under an archive root
//! - [`load_messages`] - merges one channel's raw records across batches
//! - [`Archive`] - cached, normalized access plus querying

mod index;
mod loader;
mod store;

pub use index::ArchiveIndex;
pub use loader::load_messages;
pub use store::Archive;
