//! Reading, creating and updating the scanner configuration file.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use crate::address;
use crate::diagnostics::ActivityLog;
use crate::fs::{with_suffix, write_atomic};
use crate::ini::IniDocument;

use super::locations::{ConfigLocations, LocationTier, Resolution};
use super::{CONTENTS_SECTION, SCANNER_ADDRESS_KEY, ScannerConfigError, default_contents};

/// Scanner configuration store.
///
/// Owns the candidate locations and the placeholder address written into
/// freshly created files.
#[derive(Debug, Clone)]
pub struct ScannerConfigStore {
    locations: ConfigLocations,
    default_address: String,
    log: ActivityLog,
}

impl ScannerConfigStore {
    /// Creates a store over the given locations.
    ///
    /// `default_address` is written into new files as-is; callers validate it
    /// when it comes from user input.
    #[must_use]
    pub fn new(locations: ConfigLocations, default_address: impl Into<String>, log: ActivityLog) -> Self {
        Self {
            locations,
            default_address: default_address.into(),
            log,
        }
    }

    /// Returns the configured locations.
    #[must_use]
    pub const fn locations(&self) -> &ConfigLocations {
        &self.locations
    }

    /// Locates the configuration file, creating a default one if needed.
    ///
    /// Tiers are tried in order (application data, local cache, temp). Within
    /// a tier an existing `KM_TWAIN` or `KM_TWAIN.ini` is reused; otherwise a
    /// default file is created. A tier whose directory or file cannot be
    /// created is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScannerConfigError::Unavailable`] if no tier is usable. The
    /// caller should continue in read-only mode.
    pub fn resolve(&self) -> Result<Resolution, ScannerConfigError> {
        let mut tried = Vec::new();

        for (tier, path) in self.locations.candidates() {
            match self.resolve_tier(tier, &path) {
                Ok(resolution) => {
                    if resolution.created() {
                        self.log.info(format!(
                            "Created default scanner configuration at {}",
                            resolution.path().display()
                        ));
                    }
                    if resolution.is_degraded() {
                        self.log.warn(format!(
                            "Using fallback {tier} location {}; the scanner driver will not see changes",
                            resolution.path().display()
                        ));
                    }
                    return Ok(resolution);
                }
                Err(e) => {
                    self.log.warn(format!(
                        "Cannot use {tier} location {}: {e}",
                        path.display()
                    ));
                    tried.push(path);
                }
            }
        }

        self.log
            .error("No usable location for the scanner configuration, running read-only");
        Err(ScannerConfigError::Unavailable { tried })
    }

    fn resolve_tier(&self, tier: LocationTier, path: &Path) -> io::Result<Resolution> {
        if let Some(existing) = existing_file(path) {
            return Ok(Resolution::new(existing, tier, false));
        }

        write_atomic(path, default_contents(&self.default_address).as_bytes())?;
        Ok(Resolution::new(path.to_path_buf(), tier, true))
    }

    /// Reads the stored scanner address.
    ///
    /// Returns an empty string if the file cannot be read or parsed, or if
    /// `Contents.ScannerAddress` is absent. Never fails.
    #[must_use]
    pub fn read_address(&self, path: &Path) -> String {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                self.log
                    .debug(format!("Cannot read {}: {e}", path.display()));
                return String::new();
            }
        };

        match IniDocument::parse(&text) {
            Ok(doc) => doc
                .get(CONTENTS_SECTION, SCANNER_ADDRESS_KEY)
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            Err(e) => {
                self.log
                    .debug(format!("Cannot parse {}: {e}", path.display()));
                String::new()
            }
        }
    }

    /// Stores `address` as the scanner address, keeping all other keys.
    ///
    /// The address is trimmed before validation. Returns the stored value.
    ///
    /// # Errors
    ///
    /// - [`ScannerConfigError::InvalidAddress`] if the address is malformed
    /// - [`ScannerConfigError::PermissionDenied`] if the file is read-only or access is denied
    /// - [`ScannerConfigError::Unparseable`] if the existing file cannot be parsed
    /// - [`ScannerConfigError::Write`] for any other I/O failure
    pub fn write_address(&self, path: &Path, address: &str) -> Result<String, ScannerConfigError> {
        let address = address.trim();
        if !address::is_valid(address) {
            return Err(ScannerConfigError::InvalidAddress {
                address: address.to_string(),
            });
        }

        ensure_writable(path)?;

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(ScannerConfigError::from_io(path, e)),
        };

        let mut doc = IniDocument::parse(&text).map_err(|source| ScannerConfigError::Unparseable {
            path: path.to_path_buf(),
            source,
        })?;
        if !doc.has_section(CONTENTS_SECTION) {
            self.log.warn(format!(
                "{} has no [{CONTENTS_SECTION}] section, adding one",
                path.display()
            ));
        }
        doc.set(CONTENTS_SECTION, SCANNER_ADDRESS_KEY, address);

        write_atomic(path, doc.to_string().as_bytes())
            .map_err(|e| ScannerConfigError::from_io(path, e))?;

        self.log.info(format!("Scanner address set to {address}"));
        Ok(address.to_string())
    }
}

/// Returns the existing configuration file for a tier, preferring the
/// extensionless name.
fn existing_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    let with_ini = with_suffix(path, ".ini");
    with_ini.is_file().then_some(with_ini)
}

/// Checks write access up front so the caller gets an access-denied error
/// rather than a generic I/O failure from the rewrite.
fn ensure_writable(path: &Path) -> Result<(), ScannerConfigError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ScannerConfigError::from_io(path, e)),
    };

    if metadata.permissions().readonly() {
        return Err(ScannerConfigError::PermissionDenied {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "file is marked read-only"),
        });
    }

    OpenOptions::new()
        .write(true)
        .open(path)
        .map(drop)
        .map_err(|e| ScannerConfigError::from_io(path, e))
}
