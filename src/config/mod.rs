//! Configuration layer for Scan Selector.
//!
//! Command line ([`Cli`]), optional TOML file ([`TomlConfig`]) and the
//! merged result ([`ValidatedConfig`]). Built-in values live in [`defaults`].
//!
//! # Priority
//!
//! For each setting the first source that has a value wins:
//!
//! 1. command-line option
//! 2. `scan-selector.toml`
//! 3. built-in default, or the user's environment for directory roots
//!
//! # Derived Values
//!
//! Without an explicit cache file the preset cache lives at
//! `<local_cache_dir>/ScanSelector/presets.cache.ini`, using the resolved
//! local cache root (or the temp root if there is none).
//!
//! # Auto-refresh
//!
//! `--no-auto-refresh` only disables. Auto-refresh is on unless either the
//! flag is given or `watch.auto_refresh = false` is set in TOML.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
