//! Settings after CLI, TOML and environment have been merged.
//!
//! A [`ValidatedConfig`] only exists once every value has been checked.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::address;
use crate::scanner::ConfigLocations;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Merged and checked settings for one run.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML
/// config with directory defaults taken from the user's environment, or
/// [`ValidatedConfig::from_sources`] to supply those defaults explicitly.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Shared preset file
    pub remote_presets: PathBuf,

    /// Local copy of the shared preset file
    pub cache_file: PathBuf,

    /// Roots searched for the scanner configuration
    pub locations: ConfigLocations,

    /// Address written into a newly created scanner configuration
    pub default_address: String,

    /// Interval between preset source checks
    pub poll_interval: Duration,

    /// Whether presets reload when the shared file changes
    pub auto_refresh: bool,

    /// Debug-level logging
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(root: Option<&Path>) -> String {
            root.map_or_else(|| "none".to_string(), |p| p.display().to_string())
        }

        write!(
            f,
            "Config {{ remote: {}, cache: {}, app_data: {}, local_cache: {}, temp: {}, \
             default_address: {}, poll_interval: {}s, auto_refresh: {} }}",
            self.remote_presets.display(),
            self.cache_file.display(),
            show(self.locations.app_data()),
            show(self.locations.local_cache()),
            show(self.locations.temp()),
            self.default_address,
            self.poll_interval.as_secs(),
            self.auto_refresh,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration using the environment's directories
    /// as defaults for the location roots.
    ///
    /// Explicit CLI values win over TOML values.
    ///
    /// # Errors
    ///
    /// See [`Self::from_sources`].
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        Self::from_sources(cli, toml, &ConfigLocations::from_environment())
    }

    /// Creates a validated configuration with explicit fallback roots.
    ///
    /// Each root resolves as CLI > TOML > `environment`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The default address is not a dotted IPv4 address
    /// - The poll interval is zero
    /// - The remote preset path is empty
    /// - No cache file is given and no root to derive it from exists
    pub fn from_sources(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        environment: &ConfigLocations,
    ) -> Result<Self, ConfigError> {
        let paths = toml.map(|t| &t.paths);

        let locations = ConfigLocations::new(
            pick_root(
                cli.app_data_dir.as_ref(),
                paths.and_then(|p| p.app_data_dir.as_ref()),
                environment.app_data(),
            ),
            pick_root(
                cli.local_cache_dir.as_ref(),
                paths.and_then(|p| p.local_cache_dir.as_ref()),
                environment.local_cache(),
            ),
            pick_root(
                cli.temp_dir.as_ref(),
                paths.and_then(|p| p.temp_dir.as_ref()),
                environment.temp(),
            ),
        );

        let remote_presets = Self::resolve_remote(cli, toml)?;
        let cache_file = Self::resolve_cache_file(cli, toml, &locations)?;
        let default_address = Self::resolve_default_address(cli, toml)?;
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;

        // The flag only disables; TOML may disable as well.
        let auto_refresh = !cli.no_auto_refresh
            && toml
                .and_then(|t| t.watch.auto_refresh)
                .unwrap_or(defaults::AUTO_REFRESH);

        Ok(Self {
            remote_presets,
            cache_file,
            locations,
            default_address,
            poll_interval,
            auto_refresh,
            verbose: cli.verbose,
        })
    }

    /// Reads the `--config` file, if any, and merges it with the CLI.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if the merged
    /// settings do not validate.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_remote(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let remote = cli
            .remote
            .clone()
            .or_else(|| toml.and_then(|t| t.paths.remote_presets.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::REMOTE_PRESETS));

        if remote.as_os_str().is_empty() {
            return Err(ConfigError::missing_path(
                field::REMOTE_PRESETS,
                "Use --remote or set paths.remote_presets in config file",
            ));
        }

        Ok(remote)
    }

    fn resolve_cache_file(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        locations: &ConfigLocations,
    ) -> Result<PathBuf, ConfigError> {
        let explicit = cli
            .cache_file
            .clone()
            .or_else(|| toml.and_then(|t| t.paths.cache_file.clone()));

        let cache_file = explicit.or_else(|| {
            locations
                .local_cache()
                .or_else(|| locations.temp())
                .map(defaults::cache_file)
        });

        match cache_file {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(ConfigError::missing_path(
                field::CACHE_FILE,
                "Use --cache-file or set paths.cache_file in config file",
            )),
        }
    }

    fn resolve_default_address(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let value = cli
            .default_address
            .as_deref()
            .or_else(|| toml.and_then(|t| t.scanner.default_address.as_deref()))
            .unwrap_or(defaults::DEFAULT_ADDRESS);

        if !address::is_valid(value) {
            return Err(ConfigError::InvalidAddress {
                value: value.to_string(),
            });
        }

        Ok(value.trim().to_string())
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.watch.poll_interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "poll_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

fn pick_root(
    cli: Option<&PathBuf>,
    toml: Option<&PathBuf>,
    environment: Option<&Path>,
) -> Option<PathBuf> {
    cli.or(toml)
        .cloned()
        .or_else(|| environment.map(Path::to_path_buf))
}

/// Writes the commented template produced by `init`.
///
/// # Errors
///
/// Fails if `path` cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
