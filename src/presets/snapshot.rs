//! Preset snapshot types.

use std::fmt;

use serde::Serialize;

/// A named scanner address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetEntry {
    /// Preset name (the section name in the source file).
    pub name: String,
    /// Validated dotted IPv4 address.
    pub address: String,
}

impl PresetEntry {
    /// Creates an entry. The address is not validated here.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Where a snapshot's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetSource {
    /// The shared preset file.
    Remote,
    /// The local mirror of the shared file.
    Cache,
    /// Neither was readable.
    Empty,
}

impl fmt::Display for PresetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Remote => "network share",
            Self::Cache => "local cache",
            Self::Empty => "nothing",
        };
        f.write_str(name)
    }
}

/// All presets from one load, in source order.
///
/// Snapshots are never modified; each reload produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSnapshot {
    source: PresetSource,
    entries: Vec<PresetEntry>,
}

impl PresetSnapshot {
    /// Creates a snapshot from already validated entries.
    #[must_use]
    pub const fn new(entries: Vec<PresetEntry>, source: PresetSource) -> Self {
        Self { source, entries }
    }

    /// Creates the snapshot used when nothing could be loaded.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), PresetSource::Empty)
    }

    /// Returns where the entries came from.
    #[must_use]
    pub const fn source(&self) -> PresetSource {
        self.source
    }

    /// Returns entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[PresetEntry] {
        &self.entries
    }

    /// Returns entries ordered by name, ignoring case, for display.
    #[must_use]
    pub fn sorted(&self) -> Vec<&PresetEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        sorted
    }

    /// Returns preset names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Looks up a preset's address by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.address.as_str())
    }

    /// Returns the number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no presets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if both snapshots hold the same name/address pairs,
    /// regardless of where they were loaded from.
    #[must_use]
    pub fn same_entries(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> PresetSnapshot {
        PresetSnapshot::new(
            pairs.iter().map(|(n, a)| PresetEntry::new(*n, *a)).collect(),
            PresetSource::Remote,
        )
    }

    #[test]
    fn empty_snapshot_has_empty_source() {
        let empty = PresetSnapshot::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.source(), PresetSource::Empty);
    }

    #[test]
    fn names_follow_source_order() {
        let snap = snapshot(&[("Zeta", "10.0.0.3"), ("alpha", "10.0.0.1"), ("Beta", "10.0.0.2")]);
        let names: Vec<_> = snap.names().collect();
        assert_eq!(names, vec!["Zeta", "alpha", "Beta"]);
    }

    #[test]
    fn sorted_ignores_case() {
        let snap = snapshot(&[("Zeta", "10.0.0.3"), ("alpha", "10.0.0.1"), ("Beta", "10.0.0.2")]);
        let names: Vec<_> = snap.sorted().into_iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn get_matches_exact_name() {
        let snap = snapshot(&[("Reception", "10.0.0.5")]);
        assert_eq!(snap.get("Reception"), Some("10.0.0.5"));
        assert_eq!(snap.get("reception"), None);
    }

    #[test]
    fn same_entries_ignores_source() {
        let remote = snapshot(&[("A", "10.0.0.1")]);
        let cached = PresetSnapshot::new(remote.entries().to_vec(), PresetSource::Cache);

        assert!(remote.same_entries(&cached));
        assert_ne!(remote, cached);
    }

    #[test]
    fn source_display_names() {
        assert_eq!(PresetSource::Remote.to_string(), "network share");
        assert_eq!(PresetSource::Cache.to_string(), "local cache");
        assert_eq!(PresetSource::Empty.to_string(), "nothing");
    }
}
