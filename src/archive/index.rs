//! Discovery of export batches and channel files.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ArchiveConfig;
use crate::error::Result;

/// Read-only view of an archive root directory.
///
/// # Example
///
/// ```rust,no_run
/// use slackview::archive::ArchiveIndex;
/// use slackview::config::ArchiveConfig;
///
/// let index = ArchiveIndex::new(ArchiveConfig::new().with_root("dumps"));
/// for channel in index.list_channels()? {
///     println!("{channel}");
/// }
/// # Ok::<(), slackview::SlackviewError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveIndex {
    config: ArchiveConfig,
}

impl ArchiveIndex {
    /// Creates an index over the configured archive root.
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this index was built with.
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Lists batch directories in name order.
    ///
    /// # Errors
    ///
    /// Fails only if the archive root itself cannot be read.
    pub fn batches(&self) -> Result<Vec<PathBuf>> {
        let mut batches: Vec<PathBuf> = fs::read_dir(self.config.root())?
            .flatten()
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.config.is_batch_name(name))
            })
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();

        batches.sort();
        tracing::debug!(root = %self.config.root().display(), count = batches.len(), "scanned batches");
        Ok(batches)
    }

    /// Lists archive file names inside one batch, in name order.
    ///
    /// Returns `None` (and logs a warning) if the batch cannot be read.
    fn batch_files(&self, batch: &Path) -> Option<Vec<String>> {
        let entries = match fs::read_dir(batch) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(batch = %batch.display(), error = %e, "skipping unreadable batch");
                return None;
            }
        };

        let mut files: Vec<String> = entries
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.config.is_archive_file(name))
            .collect();
        files.sort();
        Some(files)
    }

    /// Returns every channel that appears in at least one batch, sorted.
    pub fn list_channels(&self) -> Result<Vec<String>> {
        let mut channels = BTreeSet::new();
        for batch in self.batches()? {
            let Some(files) = self.batch_files(&batch) else {
                continue;
            };
            channels.extend(files.iter().map(|name| self.config.channel_of(name)));
        }
        Ok(channels.into_iter().collect())
    }

    /// Returns the file holding `channel` in each batch, in batch order.
    ///
    /// Candidates must start with `<channel><separator>` and carry the
    /// configured extension (`general_2021.json`). A batch without such a
    /// file contributes nothing. When a batch holds several candidates, the
    /// first by name is used.
    pub fn channel_files(&self, channel: &str) -> Result<Vec<PathBuf>> {
        let prefix = self.config.channel_prefix(channel);
        let mut paths = Vec::new();

        for batch in self.batches()? {
            let Some(files) = self.batch_files(&batch) else {
                continue;
            };
            match files.into_iter().find(|name| name.starts_with(&prefix)) {
                Some(name) => paths.push(batch.join(name)),
                None => {
                    tracing::debug!(channel, batch = %batch.display(), "channel absent from batch");
                }
            }
        }

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), r#"{"messages": []}"#).unwrap();
    }

    #[test]
    fn test_list_channels_across_batches() {
        let root = tempdir().unwrap();
        let b1 = root.path().join("from_2021");
        let b2 = root.path().join("from_2022-2023");
        fs::create_dir_all(&b1).unwrap();
        fs::create_dir_all(&b2).unwrap();
        touch(&b1, "general_2021.json");
        touch(&b1, "random_2021.json");
        touch(&b2, "general_2022-2023.json");
        touch(&b2, "dev_ops_2022.json");
        touch(&b2, "notes.txt");

        // Not a batch: wrong prefix
        let other = root.path().join("backup");
        fs::create_dir_all(&other).unwrap();
        touch(&other, "secret_2020.json");

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        let channels = index.list_channels().unwrap();
        assert_eq!(channels, vec!["dev", "general", "random"]);
    }

    #[test]
    fn test_channel_files_in_batch_order() {
        let root = tempdir().unwrap();
        for batch in ["from_2022", "from_2021", "from_2023"] {
            fs::create_dir_all(root.path().join(batch)).unwrap();
        }
        touch(&root.path().join("from_2021"), "general_2021.json");
        touch(&root.path().join("from_2023"), "general_2023.json");
        touch(&root.path().join("from_2022"), "random_2022.json");

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        let files = index.channel_files("general").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("from_2021/general_2021.json"));
        assert!(files[1].ends_with("from_2023/general_2023.json"));
    }

    #[test]
    fn test_channel_prefix_is_not_substring_match() {
        let root = tempdir().unwrap();
        let batch = root.path().join("from_2021");
        fs::create_dir_all(&batch).unwrap();
        touch(&batch, "general-chat_2021.json");

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        assert!(index.channel_files("general").unwrap().is_empty());
    }

    #[test]
    fn test_batch_prefix_file_is_ignored() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("from_notes"), "not a dir").unwrap();

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        assert!(index.batches().unwrap().is_empty());
        assert!(index.list_channels().unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let root = tempdir().unwrap();
        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path().join("nope")));
        assert!(index.list_channels().unwrap_err().is_io());
    }

    #[test]
    fn test_channel_files_require_extension() {
        let root = tempdir().unwrap();
        let batch = root.path().join("from_2021");
        fs::create_dir_all(&batch).unwrap();
        touch(&batch, "general_2021.json.bak");
        touch(&batch, "general_2021.txt");

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        assert!(index.channel_files("general").unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_batch_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempdir().unwrap();
        let locked = root.path().join("from_2022");
        let open = root.path().join("from_2023");
        fs::create_dir_all(&locked).unwrap();
        fs::create_dir_all(&open).unwrap();
        touch(&locked, "secret_2022.json");
        touch(&locked, "general_2022.json");
        touch(&open, "general_2023.json");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let readable_anyway = fs::read_dir(&locked).is_ok();
        if readable_anyway {
            // Privileged users bypass directory permissions
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        let channels = index.list_channels();
        let files = index.channel_files("general");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(channels.unwrap(), vec!["general"]);
        let files = files.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("from_2023/general_2023.json"));
    }
}
