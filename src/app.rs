//! Process-level helpers for `main`: exit codes, config hints, logging.

use scan_selector::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit codes reported by `scan-selector`.
pub mod exit_code {
    use std::process::ExitCode;

    /// Command completed (0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Settings could not be loaded or validated (1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// An action was rejected or failed at runtime (2).
    ///
    /// `ExitCode::from` is not `const`, hence a function.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Suggests a next step for configuration errors the user can fix.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'scan-selector init' to generate a configuration template.");
        }
        ConfigError::MissingPath { field: f, .. } if *f == field::CACHE_FILE => {
            eprintln!("\nPass --cache-file or --local-cache-dir to choose where presets are cached.");
        }
        _ => {}
    }
}

/// Installs the tracing subscriber on stderr, leaving stdout to command output.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
