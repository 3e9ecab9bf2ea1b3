//! Merging a channel's files from every batch.

use std::fs;

use super::ArchiveIndex;
use crate::error::{Result, SlackviewError};
use crate::parsing::slack::{RawMessage, parse_export};

/// Loads the raw records of `channel` from every batch that contains it.
///
/// Records are appended batch by batch, in batch order, each batch in
/// file order. A channel absent from every batch yields an empty vector.
///
/// # Errors
///
/// Returns [`SlackviewError::Io`] if a channel file cannot be read and
/// [`SlackviewError::Parse`] if it is not a valid channel export.
pub fn load_messages(index: &ArchiveIndex, channel: &str) -> Result<Vec<RawMessage>> {
    let mut all = Vec::new();

    for path in index.channel_files(channel)? {
        let content = fs::read_to_string(&path)?;
        let records =
            parse_export(&content).map_err(|e| SlackviewError::parse(channel, &path, e))?;
        tracing::debug!(channel, file = %path.display(), records = records.len(), "loaded channel file");
        all.extend(records);
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchiveConfig;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(root: &Path, batch: &str, file: &str, content: &str) {
        let dir = root.join(batch);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_load_merges_batches_in_order() {
        let root = tempdir().unwrap();
        write(
            root.path(),
            "from_2021",
            "general_2021.json",
            r#"{"messages": [{"ts": "1609459200.000100", "text": "a"}, {"ts": "1609459300.000100", "text": "b"}]}"#,
        );
        write(
            root.path(),
            "from_2022",
            "general_2022.json",
            r#"{"messages": [{"ts": "1640995200.000100", "text": "c"}]}"#,
        );
        write(root.path(), "from_2023", "random_2023.json", r#"{"messages": [{"ts": "1", "text": "x"}]}"#);

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        let raw = load_messages(&index, "general").unwrap();
        let texts: Vec<_> = raw.iter().map(|r| r.text.as_deref().unwrap()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_unknown_channel_is_empty() {
        let root = tempdir().unwrap();
        write(root.path(), "from_2021", "general_2021.json", r#"{"messages": []}"#);

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        assert!(load_messages(&index, "nobody").unwrap().is_empty());
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let root = tempdir().unwrap();
        write(root.path(), "from_2021", "general_2021.json", "{not json");

        let index = ArchiveIndex::new(ArchiveConfig::new().with_root(root.path()));
        let err = load_messages(&index, "general").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("general_2021.json"));
    }
}
