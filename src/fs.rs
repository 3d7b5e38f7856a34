//! Small filesystem helpers shared by the config store and the preset cache.

use std::io;
use std::path::{Path, PathBuf};

/// Returns `path` with `suffix` appended to its final component.
///
/// Appends rather than replacing the extension, so `KM_TWAIN` becomes
/// `KM_TWAIN.ini` and `presets.cache.ini` becomes `presets.cache.ini.tmp`.
#[must_use]
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Replaces the contents of `path`, creating parent directories as needed.
///
/// Writes to `{path}.tmp` and renames it over the target so readers never
/// observe a half-written file. If the temporary file cannot be created
/// (e.g. the directory is not writable but the file is), the target is
/// rewritten in place instead.
///
/// # Errors
///
/// Returns the underlying I/O error if the directory cannot be created or
/// neither write strategy succeeds.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = with_suffix(path, ".tmp");
    if std::fs::write(&temp_path, contents).is_err() {
        return std::fs::write(path, contents);
    }

    std::fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&temp_path);
    })
}
