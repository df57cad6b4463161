//! Symlink-safe filesystem helpers.
//!
//! These helpers use `symlink_metadata()` instead of `metadata()` to avoid
//! following symlinks when walking repository trees.

use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Returns `true` if the path is a regular file (not a symlink).
///
/// Uses `symlink_metadata()` to avoid following symlinks.
#[must_use]
pub(crate) fn is_regular_file(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if the path is a regular directory (not a symlink).
///
/// Uses `symlink_metadata()` to avoid following symlinks.
#[must_use]
pub(crate) fn is_regular_dir(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

/// Maximum recursion depth for markdown discovery.
const MAX_WALK_DEPTH: usize = 10;

/// Recursively list `.md` files under a root, sorted by path.
///
/// Skips `.git*` entries and other hidden directories. Unreadable
/// directories are skipped silently; discovery never fails.
#[must_use]
pub fn list_markdown_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk_markdown(root, &mut out, 0);
    out.sort();
    out
}

fn walk_markdown(dir: &Path, out: &mut Vec<PathBuf>, depth: usize) {
    if depth > MAX_WALK_DEPTH {
        return;
    }
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if is_regular_dir(&path) {
            walk_markdown(&path, out, depth + 1);
        } else if is_regular_file(&path) && name.ends_with(".md") {
            out.push(path);
        }
    }
}

/// Write `content` to `path` only if it differs byte-for-byte from the
/// current file content.
///
/// Returns `true` if the file was written, `false` if it was already
/// up to date. Repeated runs over an unchanged tree are no-ops, so the
/// generator is safe to invoke from automation without producing
/// spurious diffs.
///
/// # Errors
///
/// Returns an error if the file or a missing parent directory cannot
/// be written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        let existing = std::fs::read_to_string(path)?;
        if existing == content {
            return Ok(false);
        }
    } else if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_regular_file_true_for_regular_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        fs::write(&file, "hello").unwrap();
        assert!(is_regular_file(&file));
    }

    #[test]
    fn is_regular_file_false_for_directory() {
        let dir = tempdir().unwrap();
        assert!(!is_regular_file(dir.path()));
    }

    #[test]
    fn is_regular_file_false_for_nonexistent() {
        let path = Path::new("/nonexistent/path/file.txt");
        assert!(!is_regular_file(path));
    }

    #[cfg(unix)]
    #[test]
    fn is_regular_file_false_for_symlink_to_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target.txt");
        fs::write(&target, "hello").unwrap();
        let link = dir.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        assert!(!is_regular_file(&link));
    }

    #[test]
    fn is_regular_dir_true_for_regular_dir() {
        let dir = tempdir().unwrap();
        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        assert!(is_regular_dir(&subdir));
    }

    #[test]
    fn is_regular_dir_false_for_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        fs::write(&file, "hello").unwrap();
        assert!(!is_regular_dir(&file));
    }

    // ── list_markdown_files ──────────────────────────────────────────

    #[test]
    fn lists_markdown_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let files = list_markdown_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn lists_markdown_recursively() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("docs").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("inner.md"), "x").unwrap();
        let files = list_markdown_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("docs/deep/inner.md"));
    }

    #[test]
    fn skips_hidden_directories() {
        let dir = tempdir().unwrap();
        let git = dir.path().join(".git");
        fs::create_dir(&git).unwrap();
        fs::write(git.join("config.md"), "x").unwrap();
        assert!(list_markdown_files(dir.path()).is_empty());
    }

    #[test]
    fn empty_root_yields_empty_list() {
        let dir = tempdir().unwrap();
        assert!(list_markdown_files(dir.path()).is_empty());
    }

    #[test]
    fn nonexistent_root_yields_empty_list() {
        let root = Path::new("/nonexistent/path/anywhere");
        assert!(list_markdown_files(root).is_empty());
    }

    // ── write_if_changed ─────────────────────────────────────────────

    #[test]
    fn write_if_changed_writes_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.md");
        assert!(write_if_changed(&path, "content").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn write_if_changed_skips_identical_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.md");
        fs::write(&path, "content").unwrap();
        assert!(!write_if_changed(&path, "content").unwrap());
    }

    #[test]
    fn write_if_changed_overwrites_different_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.md");
        fs::write(&path, "old").unwrap();
        assert!(write_if_changed(&path, "new").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_if_changed_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.md");
        assert!(write_if_changed(&path, "content").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }
}
