//! Input path checks performed before a sweep.

use crate::error::{OrganizeError, Result};
use std::fs;
use std::path::Path;

/// Paths at or above this length (in bytes) are rejected, both as input and
/// when building destination paths.
pub const MAX_PATH_LENGTH: usize = 2048;

/// Returns true if the path is non-empty and shorter than [`MAX_PATH_LENGTH`].
pub fn is_path_safe(path: &Path) -> bool {
    let len = path.as_os_str().len();
    len > 0 && len < MAX_PATH_LENGTH
}

/// Returns true if `path` is a safe-length path naming an existing directory.
///
/// Symbolic links are followed. This never fails: anything that cannot be
/// stat'ed is simply not a valid directory.
pub fn is_valid_directory(path: &Path) -> bool {
    check_directory(path).is_ok()
}

/// Like [`is_valid_directory`], but says why the path was rejected.
pub fn check_directory(path: &Path) -> Result<()> {
    if !is_path_safe(path) {
        return Err(OrganizeError::InvalidPath(path.to_path_buf()));
    }
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(OrganizeError::NotADirectory(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_directory_is_valid() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(is_valid_directory(temp_dir.path()));
    }

    #[test]
    fn test_regular_file_is_not_a_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("file.txt");
        fs::write(&file_path, "content").expect("Failed to write test file");

        assert!(!is_valid_directory(&file_path));
        assert!(matches!(
            check_directory(&file_path),
            Err(OrganizeError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_missing_path_is_invalid() {
        assert!(!is_valid_directory(Path::new("/non/existent/path")));
    }

    #[test]
    fn test_empty_and_overlong_paths_are_invalid() {
        assert!(matches!(
            check_directory(Path::new("")),
            Err(OrganizeError::InvalidPath(_))
        ));

        let long = "a".repeat(MAX_PATH_LENGTH);
        assert!(!is_path_safe(Path::new(&long)));
        assert!(matches!(
            check_directory(Path::new(&long)),
            Err(OrganizeError::InvalidPath(_))
        ));
    }
}
