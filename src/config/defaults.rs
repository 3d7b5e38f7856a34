//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default shared preset file.
pub const REMOTE_PRESETS: &str = r"\\storage\Instal\printers\presets.ini";

/// Placeholder address written into a newly created scanner configuration.
pub const DEFAULT_ADDRESS: &str = "10.0.0.1";

/// Default interval between preset source checks, in seconds.
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Whether the preset source is watched unless disabled.
pub const AUTO_REFRESH: bool = true;

/// Directory below the local cache root holding the preset cache.
pub const CACHE_DIR_NAME: &str = "ScanSelector";

/// File name of the preset cache.
pub const CACHE_FILE_NAME: &str = "presets.cache.ini";

/// File written by `init` when no output path is given.
pub const CONFIG_FILE: &str = "scan-selector.toml";

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}

/// Preset cache location below a local cache root.
#[must_use]
pub fn cache_file(local_cache: &Path) -> PathBuf {
    local_cache.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME)
}
