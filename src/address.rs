//! Scanner address validation.
//!
//! Every address that ends up in the scanner configuration or in a preset
//! snapshot goes through [`is_valid`]. The check is purely syntactic: no
//! reachability probe is performed.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

/// Dotted-quad pattern with each octet limited to 0-255.
///
/// ASCII digit classes only; `\d` would also accept other Unicode digits.
static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])$")
        .expect("IPv4 pattern is a valid regex")
});

/// Returns `true` if `candidate`, after trimming surrounding whitespace,
/// is a dotted-quad IPv4 address.
///
/// # Examples
///
/// ```
/// use scan_selector::address::is_valid;
///
/// assert!(is_valid("192.168.1.1"));
/// assert!(is_valid("10.0.0.1 "));
/// assert!(!is_valid("256.1.1.1"));
/// assert!(!is_valid("1.2.3"));
/// ```
#[must_use]
pub fn is_valid(candidate: &str) -> bool {
    IPV4_PATTERN.is_match(candidate.trim())
}

/// Parses a candidate address into an [`Ipv4Addr`].
///
/// Accepts exactly what [`is_valid`] accepts, including octets written with
/// a single leading zero (`"01.0.0.09"` parses as `1.0.0.9`).
#[must_use]
pub fn parse(candidate: &str) -> Option<Ipv4Addr> {
    let trimmed = candidate.trim();
    if !IPV4_PATTERN.is_match(trimmed) {
        return None;
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(trimmed.split('.')) {
        *slot = part.parse().ok()?;
    }
    Some(Ipv4Addr::from(octets))
}
