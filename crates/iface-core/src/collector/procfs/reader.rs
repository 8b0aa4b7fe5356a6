//! Snapshot reader for `/proc/net/dev`.
//!
//! Reads the whole statistics file on every call; there is no incremental
//! or streaming read.

use crate::collector::procfs::CollectError;
use crate::collector::traits::FileSystem;
use std::path::PathBuf;
use tracing::trace;

/// Reads network interface statistics and host identity from `/proc/`.
pub struct NetDevReader<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> NetDevReader<F> {
    /// Creates a new reader.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Path of the interface statistics file.
    pub fn net_dev_path(&self) -> PathBuf {
        PathBuf::from(format!("{}/net/dev", self.proc_path))
    }

    /// Path of the kernel hostname file.
    pub fn hostname_path(&self) -> PathBuf {
        PathBuf::from(format!("{}/sys/kernel/hostname", self.proc_path))
    }

    /// Reads the full content of `/proc/net/dev`.
    pub fn read_net_dev(&self) -> Result<String, CollectError> {
        let path = self.net_dev_path();
        let content = self.fs.read_to_string(&path)?;
        trace!(path = %path.display(), bytes = content.len(), "read net/dev");
        Ok(content)
    }

    /// Resolves the host name from `/proc/sys/kernel/hostname`.
    ///
    /// Returns `None` if the file is missing, unreadable or blank.
    pub fn hostname(&self) -> Option<String> {
        let content = self.fs.read_to_string(&self.hostname_path()).ok()?;
        let hostname = content.trim();
        if hostname.is_empty() {
            None
        } else {
            Some(hostname.to_string())
        }
    }

    /// Mutable access to the filesystem, used by tests to change counters
    /// between collection cycles.
    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }
}
