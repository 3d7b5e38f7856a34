//! Error types for scanner configuration operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ini::IniError;

/// Error type for scanner configuration operations.
///
/// Reads never fail (a missing or unreadable address is reported as empty);
/// these variants cover resolution and updates only.
#[derive(Debug, Error)]
pub enum ScannerConfigError {
    /// The address is not a dotted-quad IPv4 address. Nothing was written.
    #[error("Invalid scanner address '{address}': expected a dotted IPv4 address such as 192.168.1.10")]
    InvalidAddress {
        /// The rejected input (trimmed)
        address: String,
    },

    /// Every location tier failed; the configuration cannot be created.
    #[error("No usable location for the scanner configuration (tried: {})", join_paths(.tried))]
    Unavailable {
        /// Base paths attempted, in tier order
        tried: Vec<PathBuf>,
    },

    /// The file or its directory denies write access.
    #[error("Access denied to '{}': {source}", path.display())]
    PermissionDenied {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure while updating the file.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The existing file cannot be parsed, so it cannot be safely updated.
    #[error("Cannot update '{}', existing content is not valid: {source}", path.display())]
    Unparseable {
        /// Path of the damaged file
        path: PathBuf,
        /// Parse failure
        #[source]
        source: IniError,
    },
}

impl ScannerConfigError {
    /// Classifies an I/O error as [`Self::PermissionDenied`] or [`Self::Write`].
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path, source }
        } else {
            Self::Write { path, source }
        }
    }

    /// Returns `true` for malformed address input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidAddress { .. })
    }

    /// Returns `true` for access-denied failures.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "none".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn from_io_classifies_permission_denied() {
        let error = ScannerConfigError::from_io(
            "KM_TWAIN",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(error.is_permission_denied());
        assert!(error.to_string().starts_with("Access denied to 'KM_TWAIN'"));
    }

    #[test]
    fn from_io_classifies_other_errors_as_write() {
        let error = ScannerConfigError::from_io(
            "KM_TWAIN",
            io::Error::new(io::ErrorKind::StorageFull, "disk full"),
        );
        assert!(matches!(error, ScannerConfigError::Write { .. }));
        assert!(!error.is_permission_denied());
    }

    #[test]
    fn write_error_preserves_source() {
        let error = ScannerConfigError::from_io("x", io::Error::other("boom"));
        assert!(error.source().unwrap().to_string().contains("boom"));
    }

    #[test]
    fn invalid_address_is_validation() {
        let error = ScannerConfigError::InvalidAddress {
            address: "1.2.3".to_string(),
        };
        assert!(error.is_validation());
        assert!(error.to_string().contains("'1.2.3'"));
    }

    #[test]
    fn unavailable_lists_every_path() {
        let error = ScannerConfigError::Unavailable {
            tried: vec![PathBuf::from("a"), PathBuf::from("b")],
        };
        assert_eq!(
            error.to_string(),
            "No usable location for the scanner configuration (tried: a, b)"
        );
    }

    #[test]
    fn unavailable_without_paths() {
        let error = ScannerConfigError::Unavailable { tried: vec![] };
        assert!(error.to_string().ends_with("(tried: none)"));
    }
}
