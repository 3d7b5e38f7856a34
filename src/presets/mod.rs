//! Named scanner address presets.
//!
//! This module provides:
//! - Snapshot types ([`PresetEntry`], [`PresetSnapshot`], [`PresetSource`])
//! - Parsing of the shared preset file ([`parse_presets`])
//! - A best-effort local mirror of the shared file ([`PresetCache`])
//! - The repository producing the current snapshot ([`PresetRepository`])
//!
//! # Preset File
//!
//! One section per preset; the section name is the preset name and the
//! section's `ScannerAddress` key holds its address:
//!
//! ```text
//! [Accounting 2nd floor]
//! ScannerAddress=192.168.10.21
//!
//! [Reception]
//! ScannerAddress=192.168.10.5
//! ```
//!
//! Sections without a valid dotted IPv4 address are skipped individually.

mod cache;
mod repository;
mod snapshot;

#[cfg(test)]
mod repository_tests;

pub use cache::PresetCache;
pub use repository::PresetRepository;
pub use snapshot::{PresetEntry, PresetSnapshot, PresetSource};

use crate::address;
use crate::diagnostics::ActivityLog;
use crate::ini::{IniDocument, IniError};
use crate::scanner::SCANNER_ADDRESS_KEY;

/// Parses preset file text into entries, in file order.
///
/// Entries whose address is missing or invalid are reported to `log` and
/// left out.
///
/// # Errors
///
/// Returns an [`IniError`] if the text is not a well-formed document; no
/// partial result is produced in that case.
pub fn parse_presets(text: &str, log: &ActivityLog) -> Result<Vec<PresetEntry>, IniError> {
    let doc = IniDocument::parse(text)?;
    let mut entries = Vec::new();

    for name in doc.section_names() {
        match doc.get(name, SCANNER_ADDRESS_KEY).map(str::trim) {
            Some(candidate) if address::is_valid(candidate) => {
                entries.push(PresetEntry::new(name, candidate));
            }
            Some(candidate) => {
                log.warn(format!(
                    "Preset '{name}' has invalid address '{candidate}', skipped"
                ));
            }
            None => {
                log.warn(format!("Preset '{name}' has no {SCANNER_ADDRESS_KEY}, skipped"));
            }
        }
    }

    Ok(entries)
}
