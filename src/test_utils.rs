//! Test utilities and fixtures for tagfill tests.
//!
//! The main piece is [`MemoryTagStore`], an in-memory [`TagStore`] used to
//! test the batch runner without real audio files: reads come from a shared
//! map, writes land in the same map, and individual paths can be made to
//! fail persistence to exercise failure isolation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::metadata::{TagSet, TagStore, TagStoreError};

/// In-memory tag store. Cloning shares the underlying map, so tests can
/// keep a handle and inspect what the runner persisted.
#[derive(Clone, Default)]
pub struct MemoryTagStore {
    tags: Arc<Mutex<HashMap<PathBuf, TagSet>>>,
    fail_write_for: Option<String>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes fail for any path whose filename contains `needle`.
    pub fn fail_writes_containing(mut self, needle: &str) -> Self {
        self.fail_write_for = Some(needle.to_string());
        self
    }

    /// Pre-populate the tags for a path, as if the file already carried them.
    pub fn seed(&self, path: &Path, tags: TagSet) {
        self.tags
            .lock()
            .expect("tag map poisoned")
            .insert(path.to_path_buf(), tags);
    }

    /// The tag set currently stored for a path, if any.
    pub fn written(&self, path: &Path) -> Option<TagSet> {
        self.tags
            .lock()
            .expect("tag map poisoned")
            .get(path)
            .cloned()
    }
}

impl TagStore for MemoryTagStore {
    fn read_tags(&self, path: &Path) -> Result<TagSet, TagStoreError> {
        Ok(self.written(path).unwrap_or_default())
    }

    fn write_tags(&self, path: &Path, tags: &TagSet) -> Result<(), TagStoreError> {
        if let Some(ref needle) = self.fail_write_for
            && path.to_string_lossy().contains(needle)
        {
            return Err(TagStoreError::Write {
                path: path.to_path_buf(),
                message: "simulated persistence failure".to_string(),
            });
        }
        self.seed(path, tags.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemoryTagStore::new();
        let path = Path::new("/music/a.mp3");
        let tags = TagSet {
            title: Some("Title".to_string()),
            ..Default::default()
        };

        store.write_tags(path, &tags).unwrap();
        assert_eq!(store.read_tags(path).unwrap(), tags);
    }

    #[test]
    fn test_unknown_path_reads_empty() {
        let store = MemoryTagStore::new();
        assert!(store.read_tags(Path::new("/nowhere.mp3")).unwrap().is_empty());
    }

    #[test]
    fn test_simulated_write_failure() {
        let store = MemoryTagStore::new().fail_writes_containing("broken");
        let result = store.write_tags(Path::new("/music/broken.mp3"), &TagSet::default());
        assert!(matches!(result, Err(TagStoreError::Write { .. })));

        // Other paths still work.
        assert!(store.write_tags(Path::new("/music/fine.mp3"), &TagSet::default()).is_ok());
    }

    #[test]
    fn test_clone_shares_state() {
        let store = MemoryTagStore::new();
        let handle = store.clone();
        store.seed(
            Path::new("/a.mp3"),
            TagSet {
                artist: Some("Queen".to_string()),
                ..Default::default()
            },
        );
        assert!(handle.written(Path::new("/a.mp3")).is_some());
    }
}
