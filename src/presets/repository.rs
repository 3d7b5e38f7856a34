//! Preset repository: remote first, cache second, empty last.

use std::io;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;

use thiserror::Error;

use crate::diagnostics::ActivityLog;
use crate::ini::IniError;

use super::{PresetCache, PresetEntry, PresetSnapshot, PresetSource, parse_presets};

/// Why a preset source could not be used.
#[derive(Debug, Error)]
enum SourceError {
    #[error("not readable: {0}")]
    Read(#[source] io::Error),

    #[error("not UTF-8 text: {0}")]
    Encoding(#[source] Utf8Error),

    #[error("not a valid preset file: {0}")]
    Parse(#[source] IniError),
}

/// Produces preset snapshots from the shared file or its local mirror.
///
/// Holds the most recent snapshot; [`PresetRepository::reload`] replaces it
/// wholesale.
#[derive(Debug, Clone)]
pub struct PresetRepository {
    remote: PathBuf,
    cache: PresetCache,
    log: ActivityLog,
    current: PresetSnapshot,
}

impl PresetRepository {
    /// Creates a repository. Nothing is loaded until [`Self::reload`].
    #[must_use]
    pub fn new(remote: impl Into<PathBuf>, cache: PresetCache, log: ActivityLog) -> Self {
        Self {
            remote: remote.into(),
            cache,
            log,
            current: PresetSnapshot::empty(),
        }
    }

    /// Returns the shared preset file path.
    #[must_use]
    pub fn remote(&self) -> &Path {
        &self.remote
    }

    /// Returns the local cache.
    #[must_use]
    pub const fn cache(&self) -> &PresetCache {
        &self.cache
    }

    /// Returns the most recently loaded snapshot.
    #[must_use]
    pub const fn current(&self) -> &PresetSnapshot {
        &self.current
    }

    /// Loads the best available snapshot without replacing the current one.
    ///
    /// Tries the shared file first and mirrors it into the cache on success;
    /// the cache update result does not affect the returned snapshot. Any
    /// failure to read or parse the shared file falls back to the cache, and
    /// if that fails too the snapshot is empty.
    #[must_use]
    pub fn load(&self) -> PresetSnapshot {
        match self.load_remote() {
            Ok(entries) => return PresetSnapshot::new(entries, PresetSource::Remote),
            Err(e) => self.log.warn(format!(
                "Preset source {} {e}, trying local cache",
                self.remote.display()
            )),
        }

        match self.load_cache() {
            Ok(entries) => PresetSnapshot::new(entries, PresetSource::Cache),
            Err(e) => {
                self.log.warn(format!(
                    "Preset cache {} {e}, no presets available",
                    self.cache.path().display()
                ));
                PresetSnapshot::empty()
            }
        }
    }

    /// Loads a new snapshot and makes it current.
    pub fn reload(&mut self) -> &PresetSnapshot {
        let snapshot = self.load();
        self.log.info(format!(
            "Loaded {} preset(s) from {}",
            snapshot.len(),
            snapshot.source()
        ));
        self.current = snapshot;
        &self.current
    }

    fn load_remote(&self) -> Result<Vec<PresetEntry>, SourceError> {
        let bytes = std::fs::read(&self.remote).map_err(SourceError::Read)?;
        let entries = self.parse(&bytes)?;
        self.cache.refresh(&self.remote);
        Ok(entries)
    }

    fn load_cache(&self) -> Result<Vec<PresetEntry>, SourceError> {
        let bytes = self.cache.read().map_err(SourceError::Read)?;
        self.parse(&bytes)
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<PresetEntry>, SourceError> {
        let text = std::str::from_utf8(bytes).map_err(SourceError::Encoding)?;
        parse_presets(text, &self.log).map_err(SourceError::Parse)
    }
}
