//! Errors raised while building [`super::ValidatedConfig`].

use std::path::PathBuf;

use thiserror::Error;

/// Why the configuration could not be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The `--config` file is not valid for this tool.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `init` could not write the template.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The default scanner address is not a dotted IPv4 address.
    #[error("Invalid default address '{value}': expected a dotted IPv4 address")]
    InvalidAddress {
        /// The rejected value
        value: String,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A path setting is empty or cannot be derived.
    #[error("Missing path for {field}. {hint}")]
    MissingPath {
        /// Name of the field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },
}

/// Well-known field names for `MissingPath` errors.
pub mod field {
    /// The shared preset file.
    pub const REMOTE_PRESETS: &str = "remote_presets";
    /// The local preset cache.
    pub const CACHE_FILE: &str = "cache_file";
}

impl ConfigError {
    /// Creates a `MissingPath` error.
    #[must_use]
    pub const fn missing_path(field: &'static str, hint: &'static str) -> Self {
        Self::MissingPath { field, hint }
    }
}
