//! Local mirror of the shared preset file.

use std::io;
use std::path::{Path, PathBuf};

use crate::diagnostics::ActivityLog;
use crate::fs::write_atomic;

/// Best-effort copy of the shared preset file on local disk.
///
/// The cache is advisory: failing to update it never prevents the caller
/// from using data it already read from the share.
#[derive(Debug, Clone)]
pub struct PresetCache {
    path: PathBuf,
    log: ActivityLog,
}

impl PresetCache {
    /// Creates a cache backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, log: ActivityLog) -> Self {
        Self {
            path: path.into(),
            log,
        }
    }

    /// Returns the cache file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies the remote file into the cache.
    ///
    /// Returns `false` if the remote cannot be read or the cache cannot be
    /// written. Never fails.
    pub fn refresh(&self, remote: &Path) -> bool {
        match std::fs::read(remote) {
            Ok(bytes) => self.store(&bytes),
            Err(e) => {
                self.log
                    .debug(format!("Preset source {} not readable: {e}", remote.display()));
                false
            }
        }
    }

    /// Replaces the cache contents with `bytes`.
    ///
    /// Creates the cache directory if needed. Returns `false` on failure.
    fn store(&self, bytes: &[u8]) -> bool {
        match write_atomic(&self.path, bytes) {
            Ok(()) => {
                self.log
                    .debug(format!("Preset cache updated at {}", self.path.display()));
                true
            }
            Err(e) => {
                self.log.warn(format!(
                    "Cannot update preset cache {}: {e}",
                    self.path.display()
                ));
                false
            }
        }
    }

    /// Reads the cached bytes.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the cache file does not exist or cannot be read.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> PresetCache {
        PresetCache::new(
            dir.path().join("ScanSelector").join("presets.cache.ini"),
            ActivityLog::new(),
        )
    }

    #[test]
    fn refresh_copies_remote_bytes() {
        let dir = TempDir::new().unwrap();
        let remote = dir.path().join("presets.ini");
        let bytes = b"[Lab]\r\nScannerAddress=10.0.0.1\r\n; \xff not utf-8\r\n";
        std::fs::write(&remote, bytes).unwrap();
        let cache = cache_in(&dir);

        assert!(cache.refresh(&remote));
        assert_eq!(std::fs::read(cache.path()).unwrap(), bytes);
    }

    #[test]
    fn refresh_returns_false_for_missing_remote() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        assert!(!cache.refresh(&dir.path().join("missing.ini")));
        assert!(!cache.path().exists());
    }

    #[test]
    fn refresh_keeps_previous_cache_when_remote_missing() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        assert!(cache.store(b"[Old]\nScannerAddress=10.0.0.1\n"));

        assert!(!cache.refresh(&dir.path().join("missing.ini")));
        assert_eq!(
            cache.read().unwrap(),
            b"[Old]\nScannerAddress=10.0.0.1\n".to_vec()
        );
    }

    #[test]
    fn store_returns_false_when_directory_cannot_be_created() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let log = ActivityLog::new();
        let cache = PresetCache::new(blocker.join("presets.cache.ini"), log.clone());

        assert!(!cache.store(b"[A]\n"));
        assert!(log.contains("Cannot update preset cache"));
    }

    #[test]
    fn read_fails_without_cache_file() {
        let dir = TempDir::new().unwrap();
        let error = cache_in(&dir).read().unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
