//! Document naming rules: validation, the autosave path convention and
//! fallback name generation for users who decline to pick a name.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Longest accepted display name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Prefix used for auto-generated names (`record1`, `record2`, …).
pub const BASE_LABEL: &str = "record";

/// Directory (relative to the working directory) holding all autosave files.
pub const AUTOSAVE_DIR: &str = "autosave";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("the name cannot be empty")]
    Empty,
    #[error("the name is longer than {MAX_NAME_LEN} characters")]
    TooLong,
}

/// Trim and validate a user-supplied name. Names are never truncated;
/// anything over [`MAX_NAME_LEN`] is rejected so the user can re-enter it.
pub fn validate_name(input: &str) -> Result<String, NameError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(NameError::TooLong);
    }
    Ok(trimmed.to_owned())
}

/// The autosave file for a display name: `<dir>/<name>.txt`.
pub fn autosave_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.txt"))
}

/// Lowest-numbered `record{N}.txt` (N >= 1) not present in `dir`.
///
/// Purely a lookup — the file is not created, so two calls in a row
/// return the same name until something claims it on disk.
pub fn fallback_name(dir: &Path) -> String {
    let mut counter: u32 = 1;
    while autosave_path(dir, &format!("{BASE_LABEL}{counter}")).exists() {
        counter += 1;
    }
    format!("{BASE_LABEL}{counter}")
}

/// Display name derived from a manually chosen file path (its stem).
pub fn display_name_from_path(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_within_bounds() {
        assert_eq!(validate_name("a").unwrap(), "a");
        let fifty: String = "x".repeat(50);
        assert_eq!(validate_name(&fifty).unwrap(), fifty);
        // surrounding whitespace is stripped, not rejected
        assert_eq!(validate_name("  draft  ").unwrap(), "draft");
    }

    #[test]
    fn rejects_empty_and_overlong_names() {
        assert_eq!(validate_name(""), Err(NameError::Empty));
        assert_eq!(validate_name("   \t "), Err(NameError::Empty));
        assert_eq!(validate_name(&"x".repeat(51)), Err(NameError::TooLong));
        // length is measured in characters, not bytes
        assert!(validate_name(&"é".repeat(50)).is_ok());
    }

    #[test]
    fn fallback_name_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let first = fallback_name(dir.path());
        assert_eq!(first, "record1");
        assert_eq!(fallback_name(dir.path()), first);
    }

    #[test]
    fn fallback_name_skips_taken_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("record1.txt"), "x").unwrap();
        assert_eq!(fallback_name(dir.path()), "record2");
        std::fs::write(dir.path().join("record2.txt"), "x").unwrap();
        assert_eq!(fallback_name(dir.path()), "record3");
    }

    #[test]
    fn autosave_path_appends_txt() {
        let p = autosave_path(Path::new("autosave"), "draft");
        assert_eq!(p, Path::new("autosave").join("draft.txt"));
    }

    #[test]
    fn display_name_comes_from_the_stem() {
        assert_eq!(
            display_name_from_path(Path::new("/tmp/notes/draft.txt")).unwrap(),
            "draft"
        );
    }
}
