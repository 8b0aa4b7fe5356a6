//! In-memory mock filesystem for testing collectors without real `/proc`.
//!
//! `MockFs` simulates a filesystem in memory, allowing tests to run on macOS
//! and in CI environments without Linux. Files can be replaced between calls
//! to simulate counters changing across collection cycles.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Paths that fail to read with `PermissionDenied`.
    unreadable: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content, replacing any previous content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.unreadable.remove(&path);
        self.files.insert(path, content.into());
    }

    /// Adds a file that exists but cannot be read.
    pub fn add_unreadable(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.files.remove(&path);
        self.unreadable.insert(path);
    }

    /// Removes a file. Returns its previous content, if any.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) -> Option<String> {
        let path = path.as_ref();
        self.unreadable.remove(path);
        self.files.remove(path)
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }

        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/net/dev", "Inter-|\n");

        let content = fs.read_to_string(Path::new("/proc/net/dev")).unwrap();
        assert_eq!(content, "Inter-|\n");
    }

    #[test]
    fn test_mock_fs_replace_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/net/dev", "first");
        fs.add_file("/proc/net/dev", "second");

        let content = fs.read_to_string(Path::new("/proc/net/dev")).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.read_to_string(Path::new("/nonexistent"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mock_fs_unreadable() {
        let mut fs = MockFs::new();
        fs.add_unreadable("/proc/net/dev");

        let err = fs.read_to_string(Path::new("/proc/net/dev")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        fs.add_file("/proc/net/dev", "readable again");
        assert!(fs.read_to_string(Path::new("/proc/net/dev")).is_ok());
    }

    #[test]
    fn test_mock_fs_remove_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/net/dev", "content");

        assert_eq!(fs.remove_file("/proc/net/dev"), Some("content".to_string()));
        let err = fs.read_to_string(Path::new("/proc/net/dev")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
