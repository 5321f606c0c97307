//! Filesystem access for the autosave directory: listing, loading,
//! writing and deleting `<name>.txt` files.
//!
//! There is no index or manifest — the set of known documents is exactly
//! the set of `.txt` files present, re-read on every listing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::naming;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no autosave file named '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One entry of the autosave directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveEntry {
    pub display_name: String,
    pub path: PathBuf,
}

pub struct AutosaveStore {
    dir: PathBuf,
}

impl AutosaveStore {
    /// Open the store, creating the directory on first run.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "autosave store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        naming::autosave_path(&self.dir, name)
    }

    /// Enumerate the autosave files, in whatever order the filesystem
    /// returns them. Recomputed on every call.
    pub fn list(&self) -> Result<Vec<AutosaveEntry>, StoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "txt") && path.is_file() {
                if let Some(display_name) = naming::display_name_from_path(&path) {
                    entries.push(AutosaveEntry { display_name, path });
                }
            }
        }
        Ok(entries)
    }

    pub fn load(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_owned()));
        }
        Ok(fs::read_to_string(&path)?)
    }

    /// Full overwrite of `<dir>/<name>.txt`. No atomic rename; the autosave
    /// file is a safety net, not the document of record.
    pub fn write(&self, name: &str, content: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        fs::write(&path, content)?;
        debug!(name, bytes = content.len(), "autosave written");
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_owned()));
        }
        fs::remove_file(&path)?;
        info!(name, "autosave file deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, AutosaveStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AutosaveStore::open(dir.path().join("autosave")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_the_directory() {
        let (_tmp, store) = store();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn write_then_load() {
        let (_tmp, store) = store();
        store.write("draft", "hello").unwrap();
        assert_eq!(store.load("draft").unwrap(), "hello");
    }

    #[test]
    fn load_missing_is_not_found() {
        let (_tmp, store) = store();
        match store.load("draft") {
            Err(StoreError::NotFound(name)) => assert_eq!(name, "draft"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn delete_missing_is_not_found_and_creates_nothing() {
        let (_tmp, store) = store();
        assert!(matches!(
            store.delete("draft"),
            Err(StoreError::NotFound(_))
        ));
        assert!(!store.path_for("draft").exists());
    }

    #[test]
    fn delete_removes_the_file() {
        let (_tmp, store) = store();
        store.write("draft", "hello").unwrap();
        store.delete("draft").unwrap();
        assert!(!store.path_for("draft").exists());
    }

    #[test]
    fn list_reflects_the_directory() {
        let (_tmp, store) = store();
        assert!(store.list().unwrap().is_empty());
        store.write("draft", "a").unwrap();
        store.write("record1", "b").unwrap();
        // a stray non-txt file is not an autosave entry
        fs::write(store.dir().join("notes.md"), "x").unwrap();
        let mut names: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|e| e.display_name)
            .collect();
        names.sort();
        assert_eq!(names, ["draft", "record1"]);
    }
}
