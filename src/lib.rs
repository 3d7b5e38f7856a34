//! Scan Selector: scanner address selection
//!
//! A library for reading and changing the network address a scanner driver
//! uses, with named presets loaded from a network share and mirrored into a
//! local cache.

pub mod address;
pub mod config;
pub mod diagnostics;
pub mod fs;
pub mod ini;
pub mod presets;
pub mod scanner;
pub mod selector;
pub mod time;
pub mod watch;
