use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Reports when a watched resource was last modified.
///
/// Calls may block; an unresponsive network share stalls the caller until
/// the operating system gives up.
pub trait ModificationProbe: Send + Sync {
    /// Returns the last modification time.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the resource cannot be inspected.
    fn modified(&self) -> io::Result<SystemTime>;
}

impl<P: ModificationProbe + ?Sized> ModificationProbe for Arc<P> {
    fn modified(&self) -> io::Result<SystemTime> {
        (**self).modified()
    }
}

/// Probe reading a file's modification time from its metadata.
#[derive(Debug, Clone)]
pub struct FileProbe {
    path: PathBuf,
}

impl FileProbe {
    /// Creates a probe for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the watched path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModificationProbe for FileProbe {
    fn modified(&self) -> io::Result<SystemTime> {
        std::fs::metadata(&self.path)?.modified()
    }
}
