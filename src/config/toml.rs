//! The optional `scan-selector.toml` file.
//!
//! Every key may be left out; missing keys fall through to defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Contents of a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// File and directory locations
    #[serde(default)]
    pub paths: PathsSection,

    /// Scanner configuration defaults
    #[serde(default)]
    pub scanner: ScannerSection,

    /// Preset source watching
    #[serde(default)]
    pub watch: WatchSection,
}

/// File and directory locations.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    /// Shared preset file
    pub remote_presets: Option<PathBuf>,

    /// Local copy of the shared preset file
    pub cache_file: Option<PathBuf>,

    /// Primary configuration root
    pub app_data_dir: Option<PathBuf>,

    /// First fallback root, also holds the preset cache by default
    pub local_cache_dir: Option<PathBuf>,

    /// Last fallback root
    pub temp_dir: Option<PathBuf>,
}

/// Scanner configuration defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerSection {
    /// Address written into a newly created configuration
    pub default_address: Option<String>,
}

/// Preset source watching.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Seconds between checks
    pub poll_interval: Option<u64>,

    /// Reload presets when the shared file changes
    pub auto_refresh: Option<bool>,
}

impl TomlConfig {
    /// Reads and parses `path`.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, bad TOML or unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses file contents.
    ///
    /// # Errors
    ///
    /// Fails on bad TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Returns the commented template written by `init`.
#[must_use]
pub fn default_config_template() -> String {
    r"# Scan Selector Configuration File

[paths]
# Shared preset file, one section per preset with a ScannerAddress key
remote_presets = '\\storage\Instal\printers\presets.ini'

# Local copy of the shared file, used while the share is unreachable
# (default: <local_cache_dir>/ScanSelector/presets.cache.ini)
# cache_file = 'C:\Users\me\AppData\Local\ScanSelector\presets.cache.ini'

# Roots searched for the scanner configuration (Kyocera/KM_TWAIN), in order.
# Defaults come from the user's environment.
# app_data_dir = 'C:\Users\me\AppData\Roaming'
# local_cache_dir = 'C:\Users\me\AppData\Local'
# temp_dir = 'C:\Users\me\AppData\Local\Temp'

[scanner]
# Address written when a new scanner configuration is created (default: 10.0.0.1)
# default_address = '10.0.0.1'

[watch]
# Seconds between checks of the shared preset file (default: 30)
poll_interval = 30

# Reload presets automatically when the shared file changes (default: true)
# auto_refresh = true
"
    .to_string()
}
