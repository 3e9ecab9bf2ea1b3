//! Configuration for locating archive batches and channel files.
//!
//! This module provides [`ArchiveConfig`], a plain configuration struct with
//! no CLI framework dependencies.
//!
//! # Archive Layout
//!
//! ```text
//! dumps/
//! ├── from_2021/
//! │   ├── general_2021.json
//! │   └── random_2021.json
//! └── from_2022-2023/
//!     └── general_2022-2023.json
//! ```
//!
//! # Example
//!
//! ```rust
//! use slackview::config::ArchiveConfig;
//!
//! let config = ArchiveConfig::new()
//!     .with_root("/srv/slack/dumps")
//!     .with_batch_prefix("from_");
//!
//! assert_eq!(config.extension, "json");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default archive root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "dumps";

/// Configuration for archive discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Directory containing the batch directories (default: `dumps`)
    pub root: PathBuf,

    /// Prefix that marks a directory as an export batch (default: `from_`)
    pub batch_prefix: String,

    /// Extension of channel files, without the dot (default: `json`)
    pub extension: String,

    /// Character separating the channel name from the rest of a file name (default: `_`)
    pub separator: char,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            batch_prefix: "from_".to_string(),
            extension: "json".to_string(),
            separator: '_',
        }
    }
}

impl ArchiveConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive root directory.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the batch directory prefix.
    #[must_use]
    pub fn with_batch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.batch_prefix = prefix.into();
        self
    }

    /// Sets the channel file extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the channel name separator.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Returns the archive root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `true` if a directory name marks an export batch.
    pub fn is_batch_name(&self, name: &str) -> bool {
        name.starts_with(&self.batch_prefix)
    }

    /// Returns `true` if a file name has the archive extension.
    pub fn is_archive_file(&self, name: &str) -> bool {
        name.strip_suffix(&self.extension)
            .is_some_and(|stem| stem.ends_with('.'))
    }

    /// Extracts the channel identifier from a file name.
    ///
    /// The channel is the text before the first separator; a name without a
    /// separator is its own channel (minus the extension).
    pub fn channel_of(&self, file_name: &str) -> String {
        let stem = file_name
            .strip_suffix(&self.extension)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(file_name);
        stem.split(self.separator).next().unwrap_or(stem).to_string()
    }

    /// Returns the file-name prefix that selects a channel's file in a batch.
    pub fn channel_prefix(&self, channel: &str) -> String {
        format!("{channel}{}", self.separator)
    }
}
