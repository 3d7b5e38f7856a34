//! Scanner driver configuration store.
//!
//! The scanner driver reads its target address from a small key/value file
//! in the user's roaming application-data directory. This module provides:
//! - Location resolution with fallback tiers ([`ConfigLocations`], [`Resolution`])
//! - Reading and updating the stored address ([`ScannerConfigStore`])
//! - Error types distinguishing validation, access and I/O failures ([`ScannerConfigError`])
//!
//! # File Layout
//!
//! ```text
//! [Contents]
//! Unit=0
//! Compression=0
//! CompressionGray=0
//! ScannerAddress=10.0.0.1
//!
//! [Authentication]
//! Unit=0
//! UserName=
//! Password=
//! ```
//!
//! Only `Contents.ScannerAddress` is interpreted; every other key is carried
//! through updates unchanged.

mod error;
mod locations;
mod store;


pub use error::ScannerConfigError;
pub use locations::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigLocations, LocationTier, Resolution};
pub use store::ScannerConfigStore;

/// Section holding the scanner address.
pub const CONTENTS_SECTION: &str = "Contents";

/// Key holding the scanner address.
pub const SCANNER_ADDRESS_KEY: &str = "ScannerAddress";

/// Section holding the (unused) driver credentials.
pub const AUTHENTICATION_SECTION: &str = "Authentication";

/// Renders the file written when no configuration exists yet.
#[must_use]
pub fn default_contents(address: &str) -> String {
    format!(
        "[{CONTENTS_SECTION}]\n\
         Unit=0\n\
         Compression=0\n\
         CompressionGray=0\n\
         {SCANNER_ADDRESS_KEY}={address}\n\
         \n\
         [{AUTHENTICATION_SECTION}]\n\
         Unit=0\n\
         UserName=\n\
         Password=\n"
    )
}
