//! Actions behind the display layer.
//!
//! [`ScanSelector`] owns the scanner configuration handle and the current
//! preset snapshot. A console, window, or one-shot command renders its state
//! and invokes its actions; nothing else mutates either.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::ActivityLog;
use crate::presets::{PresetRepository, PresetSnapshot};
use crate::scanner::{LocationTier, Resolution, ScannerConfigError, ScannerConfigStore};

/// Error type for user-triggered actions.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Validation or write failure from the configuration store.
    #[error(transparent)]
    Config(#[from] ScannerConfigError),

    /// No preset with this name in the current snapshot.
    #[error("Unknown preset '{name}'")]
    UnknownPreset {
        /// Requested preset name
        name: String,
    },

    /// No configuration location could be resolved at startup.
    #[error("Scanner configuration is unavailable, changes cannot be saved")]
    ReadOnly,
}

/// Summary of the scanner configuration for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigStatus {
    /// Resolved file, if any.
    pub path: Option<PathBuf>,
    /// Tier of the resolved file, if any.
    pub tier: Option<LocationTier>,
    /// Current address, empty if none is configured.
    pub address: String,
    /// `true` unless the file is in the location the driver reads.
    pub degraded: bool,
    /// `true` when no location could be resolved.
    pub read_only: bool,
}

/// The scanner address selector.
#[derive(Debug)]
pub struct ScanSelector {
    store: ScannerConfigStore,
    repository: PresetRepository,
    resolution: Option<Resolution>,
    log: ActivityLog,
}

impl ScanSelector {
    /// Resolves the configuration file and loads presets.
    ///
    /// Never fails: without a usable configuration location the selector
    /// runs read-only, and without presets the snapshot is empty.
    pub fn open(store: ScannerConfigStore, mut repository: PresetRepository, log: ActivityLog) -> Self {
        let resolution = match store.resolve() {
            Ok(resolution) => Some(resolution),
            Err(e) => {
                log.debug(format!("Configuration resolution failed: {e}"));
                None
            }
        };
        repository.reload();

        Self {
            store,
            repository,
            resolution,
            log,
        }
    }

    /// Returns the resolved configuration file, or `None` when read-only.
    #[must_use]
    pub const fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// Returns `true` if no configuration location could be resolved.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.resolution.is_none()
    }

    /// Returns `true` unless the configuration lives where the driver reads it.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.resolution.as_ref().is_none_or(Resolution::is_degraded)
    }

    /// Returns the configured scanner address, or an empty string.
    #[must_use]
    pub fn current_address(&self) -> String {
        self.resolution
            .as_ref()
            .map(|resolution| self.store.read_address(resolution.path()))
            .unwrap_or_default()
    }

    /// Returns the configuration summary.
    #[must_use]
    pub fn status(&self) -> ConfigStatus {
        ConfigStatus {
            path: self.resolution.as_ref().map(|r| r.path().to_path_buf()),
            tier: self.resolution.as_ref().map(Resolution::tier),
            address: self.current_address(),
            degraded: self.is_degraded(),
            read_only: self.is_read_only(),
        }
    }

    /// Validates and saves `address`, returning the stored (trimmed) value.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ReadOnly`] without a configuration file, or
    /// [`ActionError::Config`] for invalid input and write failures.
    pub fn save_address(&self, address: &str) -> Result<String, ActionError> {
        let resolution = self.resolution.as_ref().ok_or(ActionError::ReadOnly)?;
        Ok(self.store.write_address(resolution.path(), address)?)
    }

    /// Saves the address of the preset called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownPreset`] if the current snapshot has no
    /// such preset, otherwise the errors of [`Self::save_address`].
    pub fn apply_preset(&self, name: &str) -> Result<String, ActionError> {
        let address = self
            .repository
            .current()
            .get(name)
            .ok_or_else(|| ActionError::UnknownPreset {
                name: name.to_string(),
            })?;

        let saved = self.save_address(address)?;
        self.log.info(format!("Applied preset '{name}'"));
        Ok(saved)
    }

    /// Reloads presets, replacing the current snapshot.
    pub fn reload_presets(&mut self) -> &PresetSnapshot {
        self.repository.reload()
    }

    /// Returns the current preset snapshot.
    #[must_use]
    pub const fn presets(&self) -> &PresetSnapshot {
        self.repository.current()
    }

    /// Returns the preset repository.
    #[must_use]
    pub const fn repository(&self) -> &PresetRepository {
        &self.repository
    }

    /// Returns the activity log shared by all components.
    #[must_use]
    pub const fn log(&self) -> &ActivityLog {
        &self.log
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
