//! The single in-memory document: its buffer, modified flag and identity.

use std::path::{Path, PathBuf};

use crate::naming;

/// What a document is called and where it was last explicitly saved.
///
/// `backing_path` is only ever set while `display_name` is set; dropping the
/// name drops the path with it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentIdentity {
    display_name: Option<String>,
    backing_path: Option<PathBuf>,
}

impl DocumentIdentity {
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn backing_path(&self) -> Option<&Path> {
        self.backing_path.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct Document {
    pub content: String,
    pub modified: bool,
    identity: DocumentIdentity,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> &DocumentIdentity {
        &self.identity
    }

    pub fn display_name(&self) -> Option<&str> {
        self.identity.display_name()
    }

    pub fn is_named(&self) -> bool {
        self.identity.display_name.is_some()
    }

    /// Give an unnamed (or renamed) document its identity. `backing` is the
    /// path the name was resolved against, normally the autosave target.
    pub fn resolve_identity(&mut self, name: String, backing: PathBuf) {
        self.identity = DocumentIdentity {
            display_name: Some(name),
            backing_path: Some(backing),
        };
    }

    /// "New document": wipe the buffer and drop the identity. The caller is
    /// responsible for resolving a fresh identity before accepting input.
    pub fn clear(&mut self) {
        self.content.clear();
        self.identity = DocumentIdentity::default();
        self.modified = false;
    }

    /// Replace the buffer with a file read from disk.
    pub fn open_from(&mut self, path: &Path, content: String) {
        self.content = content;
        if let Some(name) = naming::display_name_from_path(path) {
            self.resolve_identity(name, path.to_path_buf());
        }
        self.modified = false;
    }

    /// Note a completed manual save to `path`. The identity follows the
    /// chosen file's stem. The modified flag is intentionally left alone:
    /// manual saves have never cleared it, and changing that now would be
    /// observable in the title/status plumbing.
    pub fn record_save(&mut self, path: &Path) {
        if let Some(name) = naming::display_name_from_path(path) {
            self.resolve_identity(name, path.to_path_buf());
        }
    }

    /// Called on every buffer-change notification from the text widget.
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Where autosave will write this document, regardless of where the user
    /// last saved manually. `None` while unnamed.
    pub fn autosave_target(&self, dir: &Path) -> Option<PathBuf> {
        self.identity
            .display_name()
            .map(|name| naming::autosave_path(dir, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unnamed_and_clean() {
        let doc = Document::new();
        assert!(!doc.is_named());
        assert!(!doc.modified);
        assert_eq!(doc.identity().backing_path(), None);
    }

    #[test]
    fn open_sets_identity_and_clears_modified() {
        let mut doc = Document::new();
        doc.mark_modified();
        doc.open_from(Path::new("/tmp/notes/draft.txt"), "hello".into());
        assert_eq!(doc.display_name(), Some("draft"));
        assert_eq!(
            doc.identity().backing_path(),
            Some(Path::new("/tmp/notes/draft.txt"))
        );
        assert!(!doc.modified);
        assert_eq!(doc.content, "hello");
    }

    #[test]
    fn manual_save_does_not_clear_modified() {
        let mut doc = Document::new();
        doc.content = "hello".into();
        doc.mark_modified();
        doc.record_save(Path::new("/tmp/elsewhere/draft.txt"));
        assert_eq!(doc.display_name(), Some("draft"));
        assert!(doc.modified, "record_save must leave the modified flag set");
    }

    #[test]
    fn autosave_target_ignores_the_manual_save_location() {
        let mut doc = Document::new();
        doc.resolve_identity("draft".into(), Path::new("autosave/draft.txt").into());
        // a manual save somewhere else does not move the autosave target
        doc.record_save(Path::new("/home/user/exports/draft.txt"));
        assert_eq!(
            doc.autosave_target(Path::new("autosave")),
            Some(Path::new("autosave").join("draft.txt"))
        );
    }

    #[test]
    fn clear_drops_identity_with_the_buffer() {
        let mut doc = Document::new();
        doc.resolve_identity("draft".into(), Path::new("autosave/draft.txt").into());
        doc.content = "hello".into();
        doc.mark_modified();
        doc.clear();
        assert!(!doc.is_named());
        assert_eq!(doc.identity().backing_path(), None);
        assert!(doc.content.is_empty());
        assert!(!doc.modified);
    }
}
