//! Cache directory creation and the write probe
//!
//! Writability is proven by creating and removing a marker file. Permission
//! bits are never consulted; only a real write round-trip counts.

use std::fs;
use std::io;
use std::path::Path;

/// Marker file name used by the write probe
pub(crate) const WRITE_PROBE_FILE: &str = ".write_test";

/// Create `path` and any missing parents
pub fn ensure_directory(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Prove `dir` is writable by creating and removing a marker file
pub fn probe_write(dir: &Path) -> io::Result<()> {
    let marker = dir.join(WRITE_PROBE_FILE);
    fs::write(&marker, b"test")?;
    fs::remove_file(&marker)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn probe_succeeds_and_removes_marker() {
        let temp = TempDir::new().unwrap();
        probe_write(temp.path()).unwrap();
        assert!(!temp.path().join(WRITE_PROBE_FILE).exists());
    }

    #[test]
    fn probe_fails_when_directory_missing() {
        let temp = TempDir::new().unwrap();
        assert!(probe_write(&temp.path().join("absent")).is_err());
    }

    #[test]
    fn probe_fails_when_marker_path_is_taken_by_a_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(WRITE_PROBE_FILE)).unwrap();
        assert!(probe_write(temp.path()).is_err());
    }

    #[test]
    fn ensure_directory_creates_nested_levels() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("_caches").join("nuke");
        ensure_directory(&nested).unwrap();
        assert!(temp.path().join("_caches").is_dir());
        assert!(nested.is_dir());
    }

    #[test]
    fn ensure_directory_accepts_existing() {
        let temp = TempDir::new().unwrap();
        ensure_directory(temp.path()).unwrap();
    }

    #[test]
    fn ensure_directory_fails_when_a_file_is_in_the_way() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("_caches"), b"collision").unwrap();
        assert!(ensure_directory(&temp.path().join("_caches").join("nuke")).is_err());
    }
}
