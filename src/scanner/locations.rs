//! Candidate locations for the scanner configuration file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Directory below each root that holds the configuration file.
pub const CONFIG_DIR_NAME: &str = "Kyocera";

/// Configuration file name (no extension, as the driver expects).
pub const CONFIG_FILE_NAME: &str = "KM_TWAIN";

/// Location tier, in the order tiers are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationTier {
    /// Per-user roaming application data. The only tier the driver reads.
    Primary,
    /// Per-user local cache directory.
    LocalCache,
    /// System temporary directory.
    Temp,
}

impl fmt::Display for LocationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primary => "primary",
            Self::LocalCache => "local-cache",
            Self::Temp => "temp",
        };
        f.write_str(name)
    }
}

/// Root directories the configuration may live under.
///
/// The roots are inputs, not constants: production code derives them from
/// the environment with [`ConfigLocations::from_environment`], tests and
/// command-line overrides supply their own. A `None` root skips its tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLocations {
    app_data: Option<PathBuf>,
    local_cache: Option<PathBuf>,
    temp: Option<PathBuf>,
}

impl ConfigLocations {
    /// Creates locations from explicit roots.
    #[must_use]
    pub const fn new(
        app_data: Option<PathBuf>,
        local_cache: Option<PathBuf>,
        temp: Option<PathBuf>,
    ) -> Self {
        Self {
            app_data,
            local_cache,
            temp,
        }
    }

    /// Derives roots from the current user's environment.
    ///
    /// On Windows these are `%APPDATA%`, `%LOCALAPPDATA%` and `%TEMP%`.
    #[must_use]
    pub fn from_environment() -> Self {
        Self {
            app_data: dirs::config_dir(),
            local_cache: dirs::cache_dir(),
            temp: Some(std::env::temp_dir()),
        }
    }

    /// Replaces the application-data root.
    #[must_use]
    pub fn with_app_data(mut self, root: impl Into<PathBuf>) -> Self {
        self.app_data = Some(root.into());
        self
    }

    /// Replaces the local-cache root.
    #[must_use]
    pub fn with_local_cache(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_cache = Some(root.into());
        self
    }

    /// Replaces the temporary-directory root.
    #[must_use]
    pub fn with_temp(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp = Some(root.into());
        self
    }

    /// Returns the application-data root, if known.
    #[must_use]
    pub fn app_data(&self) -> Option<&Path> {
        self.app_data.as_deref()
    }

    /// Returns the local-cache root, if known.
    #[must_use]
    pub fn local_cache(&self) -> Option<&Path> {
        self.local_cache.as_deref()
    }

    /// Returns the temporary-directory root, if known.
    #[must_use]
    pub fn temp(&self) -> Option<&Path> {
        self.temp.as_deref()
    }

    /// Returns the configuration path for every available tier, in order.
    #[must_use]
    pub fn candidates(&self) -> Vec<(LocationTier, PathBuf)> {
        [
            (LocationTier::Primary, &self.app_data),
            (LocationTier::LocalCache, &self.local_cache),
            (LocationTier::Temp, &self.temp),
        ]
        .into_iter()
        .filter_map(|(tier, root)| {
            root.as_ref()
                .map(|root| (tier, root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
        })
        .collect()
    }
}

/// Outcome of resolving the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    path: PathBuf,
    tier: LocationTier,
    created: bool,
}

impl Resolution {
    /// Creates a resolution record.
    #[must_use]
    pub const fn new(path: PathBuf, tier: LocationTier, created: bool) -> Self {
        Self {
            path,
            tier,
            created,
        }
    }

    /// Returns the resolved file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the tier the file was found or created in.
    #[must_use]
    pub const fn tier(&self) -> LocationTier {
        self.tier
    }

    /// Returns `true` if a default file was written during resolution.
    #[must_use]
    pub const fn created(&self) -> bool {
        self.created
    }

    /// Returns `true` when running from a fallback tier.
    ///
    /// The scanner driver only reads the primary location, so saved
    /// addresses have no effect on scanning while degraded.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.tier != LocationTier::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_follow_tier_order() {
        let locations = ConfigLocations::new(
            Some(PathBuf::from("roaming")),
            Some(PathBuf::from("local")),
            Some(PathBuf::from("tmp")),
        );

        let tiers: Vec<_> = locations.candidates().into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            tiers,
            vec![LocationTier::Primary, LocationTier::LocalCache, LocationTier::Temp]
        );
    }

    #[test]
    fn candidates_append_driver_path() {
        let locations = ConfigLocations::default().with_app_data("roaming");
        let (_, path) = &locations.candidates()[0];

        assert_eq!(path, &Path::new("roaming").join("Kyocera").join("KM_TWAIN"));
    }

    #[test]
    fn missing_roots_are_skipped() {
        let locations = ConfigLocations::default().with_temp("tmp");
        let candidates = locations.candidates();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].0, LocationTier::Temp);
    }

    #[test]
    fn from_environment_always_has_temp() {
        let locations = ConfigLocations::from_environment();
        assert!(locations.temp().is_some());
    }

    #[test]
    fn only_primary_is_not_degraded() {
        let primary = Resolution::new(PathBuf::from("a"), LocationTier::Primary, false);
        let cache = Resolution::new(PathBuf::from("b"), LocationTier::LocalCache, true);
        let temp = Resolution::new(PathBuf::from("c"), LocationTier::Temp, true);

        assert!(!primary.is_degraded());
        assert!(cache.is_degraded());
        assert!(temp.is_degraded());
    }

    #[test]
    fn tier_display_names() {
        assert_eq!(LocationTier::Primary.to_string(), "primary");
        assert_eq!(LocationTier::LocalCache.to_string(), "local-cache");
        assert_eq!(LocationTier::Temp.to_string(), "temp");
    }
}
