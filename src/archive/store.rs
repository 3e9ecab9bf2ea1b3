//! Process-wide archive handle with a per-channel message cache.

use std::sync::Arc;

use dashmap::DashMap;

use super::{ArchiveIndex, load_messages};
use crate::Message;
use crate::config::ArchiveConfig;
use crate::core::query::{QueryParams, QueryResult, query_threads};
use crate::error::Result;
use crate::parsing::slack::normalize;

/// An archive root plus the normalized messages of every channel loaded so far.
///
/// Entries are filled lazily on first access and live as long as the
/// `Archive`. The map is sharded and locked per entry, so two concurrent
/// first loads of the same channel read the files once.
///
/// A first load holds its shard's write lock while the files are read and
/// parsed, so loads of other channels hashed to the same shard wait for it.
/// Cache hits on already-loaded channels only take a read lock.
///
/// # Example
///
/// ```rust,no_run
/// use slackview::archive::Archive;
/// use slackview::config::ArchiveConfig;
/// use slackview::core::QueryParams;
///
/// let archive = Archive::open(ArchiveConfig::new().with_root("dumps"));
/// let result = archive.query("general", &QueryParams::new().with_search("deploy"))?;
/// println!("{} threads", result.threads.len());
/// # Ok::<(), slackview::SlackviewError>(())
/// ```
#[derive(Debug)]
pub struct Archive {
    index: ArchiveIndex,
    cache: DashMap<String, Arc<[Message]>>,
}

impl Archive {
    /// Opens an archive. Nothing is read until the first call.
    pub fn open(config: ArchiveConfig) -> Self {
        Self {
            index: ArchiveIndex::new(config),
            cache: DashMap::new(),
        }
    }

    /// Returns the underlying index.
    pub fn index(&self) -> &ArchiveIndex {
        &self.index
    }

    /// Lists available channels.
    pub fn list_channels(&self) -> Result<Vec<String>> {
        self.index.list_channels()
    }

    /// Returns the normalized messages of `channel`, loading them on first use.
    ///
    /// # Errors
    ///
    /// Propagates I/O, parse and malformed-record errors. A failed load is
    /// not cached.
    pub fn load_and_normalize(&self, channel: &str) -> Result<Arc<[Message]>> {
        if let Some(cached) = self.cache.get(channel) {
            tracing::debug!(channel, "channel cache hit");
            return Ok(Arc::clone(cached.value()));
        }

        let entry = self
            .cache
            .entry(channel.to_string())
            .or_try_insert_with(|| self.read_channel(channel))?;
        Ok(Arc::clone(entry.value()))
    }

    /// Re-reads `channel` from disk, replacing any cached copy.
    pub fn reload(&self, channel: &str) -> Result<Arc<[Message]>> {
        let messages = self.read_channel(channel)?;
        self.cache.insert(channel.to_string(), Arc::clone(&messages));
        Ok(messages)
    }

    /// Returns `true` if `channel` is already cached.
    pub fn is_cached(&self, channel: &str) -> bool {
        self.cache.contains_key(channel)
    }

    /// Loads `channel` (through the cache) and runs a query over it.
    pub fn query(&self, channel: &str, params: &QueryParams) -> Result<QueryResult> {
        let messages = self.load_and_normalize(channel)?;
        Ok(query_threads(&messages, params))
    }

    fn read_channel(&self, channel: &str) -> Result<Arc<[Message]>> {
        tracing::debug!(channel, "channel cache miss, reading archive");
        let raw = load_messages(&self.index, channel)?;
        let messages = normalize(channel, raw)?;
        tracing::debug!(channel, messages = messages.len(), "channel normalized");
        Ok(messages.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn archive_with(content: &str) -> (tempfile::TempDir, Archive) {
        let root = tempdir().unwrap();
        let batch = root.path().join("from_2023");
        fs::create_dir_all(&batch).unwrap();
        fs::write(batch.join("general_2023.json"), content).unwrap();
        let archive = Archive::open(ArchiveConfig::new().with_root(root.path()));
        (root, archive)
    }

    #[test]
    fn test_load_is_cached() {
        let (root, archive) = archive_with(r#"{"messages": [{"ts": "1672567200", "text": "a"}]}"#);
        assert!(!archive.is_cached("general"));

        let first = archive.load_and_normalize("general").unwrap();
        assert!(archive.is_cached("general"));

        // Changing the file does not affect the cached copy
        fs::write(
            root.path().join("from_2023/general_2023.json"),
            r#"{"messages": []}"#,
        )
        .unwrap();
        let second = archive.load_and_normalize("general").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.len(), 1);

        let reloaded = archive.reload("general").unwrap();
        assert!(reloaded.is_empty());
        assert!(archive.load_and_normalize("general").unwrap().is_empty());
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let (_root, archive) = archive_with(r#"{"messages": [{"text": "no ts"}]}"#);
        assert!(archive.load_and_normalize("general").unwrap_err().is_configuration());
        assert!(!archive.is_cached("general"));
    }

    #[test]
    fn test_concurrent_loads_of_different_channels() {
        let (root, archive) = archive_with(r#"{"messages": [{"ts": "1672567200", "text": "a"}]}"#);
        fs::write(
            root.path().join("from_2023/random_2023.json"),
            r#"{"messages": [{"ts": "1672567300", "text": "b"}, {"ts": "1672567400", "text": "c"}]}"#,
        )
        .unwrap();
        let archive = Arc::new(archive);

        let handles: Vec<_> = ["general", "random", "general", "random"]
            .into_iter()
            .map(|channel| {
                let archive = Arc::clone(&archive);
                std::thread::spawn(move || archive.load_and_normalize(channel).unwrap().len())
            })
            .collect();

        let lens: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(lens, vec![1, 2, 1, 2]);
        assert!(archive.is_cached("general"));
        assert!(archive.is_cached("random"));
    }

    #[test]
    fn test_concurrent_first_loads_agree() {
        let (_root, archive) = archive_with(r#"{"messages": [{"ts": "1672567200", "text": "a"}]}"#);
        let archive = Arc::new(archive);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let archive = Arc::clone(&archive);
                std::thread::spawn(move || archive.load_and_normalize("general").unwrap())
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
