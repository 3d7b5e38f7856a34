//! Tests for preset parsing and the preset repository.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::diagnostics::ActivityLog;
use crate::presets::{PresetCache, PresetEntry, PresetRepository, PresetSource, parse_presets};

const PRESETS: &str = "\
[Accounting]
ScannerAddress=192.168.10.21

[Reception]
ScannerAddress = 192.168.10.5

[Warehouse]
ScannerAddress=10.4.0.9
";

struct Share {
    dir: TempDir,
    log: ActivityLog,
}

impl Share {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            log: ActivityLog::new(),
        }
    }

    fn remote(&self) -> PathBuf {
        self.dir.path().join("share").join("presets.ini")
    }

    fn cache_path(&self) -> PathBuf {
        self.dir.path().join("local").join("ScanSelector").join("presets.cache.ini")
    }

    fn publish(&self, content: impl AsRef<[u8]>) {
        let remote = self.remote();
        fs::create_dir_all(remote.parent().unwrap()).unwrap();
        fs::write(remote, content).unwrap();
    }

    fn seed_cache(&self, content: impl AsRef<[u8]>) {
        let cache = self.cache_path();
        fs::create_dir_all(cache.parent().unwrap()).unwrap();
        fs::write(cache, content).unwrap();
    }

    fn repository(&self) -> PresetRepository {
        let cache = PresetCache::new(self.cache_path(), self.log.clone());
        PresetRepository::new(self.remote(), cache, self.log.clone())
    }
}

fn pairs(entries: &[PresetEntry]) -> Vec<(&str, &str)> {
    entries
        .iter()
        .map(|e| (e.name.as_str(), e.address.as_str()))
        .collect()
}

mod parsing {
    use super::*;

    #[test]
    fn keeps_file_order_and_trims_addresses() {
        let entries = parse_presets(PRESETS, &ActivityLog::new()).unwrap();

        assert_eq!(
            pairs(&entries),
            vec![
                ("Accounting", "192.168.10.21"),
                ("Reception", "192.168.10.5"),
                ("Warehouse", "10.4.0.9"),
            ]
        );
    }

    #[test]
    fn drops_invalid_address_and_keeps_siblings() {
        let log = ActivityLog::new();
        let text = "[Good]\nScannerAddress=10.0.0.1\n[Bad]\nScannerAddress=999.1.1.1\n[AlsoGood]\nScannerAddress=10.0.0.2\n";

        let entries = parse_presets(text, &log).unwrap();

        assert_eq!(
            pairs(&entries),
            vec![("Good", "10.0.0.1"), ("AlsoGood", "10.0.0.2")]
        );
        assert!(log.contains("Preset 'Bad' has invalid address '999.1.1.1', skipped"));
    }

    #[test]
    fn drops_section_without_address() {
        let log = ActivityLog::new();
        let entries = parse_presets("[Notes]\nOwner=IT\n[Lab]\nScannerAddress=10.0.0.3\n", &log).unwrap();

        assert_eq!(pairs(&entries), vec![("Lab", "10.0.0.3")]);
        assert!(log.contains("Preset 'Notes' has no ScannerAddress"));
    }

    #[test]
    fn key_lookup_ignores_case() {
        let entries = parse_presets("[Lab]\nscanneraddress=10.0.0.3\n", &ActivityLog::new()).unwrap();
        assert_eq!(pairs(&entries), vec![("Lab", "10.0.0.3")]);
    }

    #[test]
    fn default_section_is_fallback_not_preset() {
        let text = "[DEFAULT]\nScannerAddress=10.9.9.9\n[Lab]\nFloor=1\n[Desk]\nScannerAddress=10.0.0.2\n";
        let entries = parse_presets(text, &ActivityLog::new()).unwrap();

        assert_eq!(pairs(&entries), vec![("Lab", "10.9.9.9"), ("Desk", "10.0.0.2")]);
    }

    #[test]
    fn tolerates_header_comments_and_spaced_notes() {
        let text = "[Lab] ; floor 2\nScannerAddress=10.0.0.1\nNote=first\n\n  second\n[Hall]\nScannerAddress=10.0.0.2\n";

        let entries = parse_presets(text, &ActivityLog::new()).unwrap();

        assert_eq!(pairs(&entries), vec![("Lab", "10.0.0.1"), ("Hall", "10.0.0.2")]);
    }

    #[test]
    fn malformed_document_is_error() {
        let result = parse_presets("[A]\nScannerAddress=10.0.0.1\n[A]\n", &ActivityLog::new());
        assert!(result.is_err());
    }
}

mod load {
    use super::*;

    #[test]
    fn reads_remote_source() {
        let share = Share::new();
        share.publish(PRESETS);

        let snapshot = share.repository().load();

        assert_eq!(snapshot.source(), PresetSource::Remote);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get("Reception"), Some("192.168.10.5"));
    }

    #[test]
    fn mirrors_remote_bytes_into_cache() {
        let share = Share::new();
        let content = PRESETS.replace('\n', "\r\n");
        share.publish(&content);

        let _ = share.repository().load();

        assert_eq!(fs::read(share.cache_path()).unwrap(), content.as_bytes());
    }

    #[test]
    fn repeated_loads_yield_identical_entries() {
        let share = Share::new();
        share.publish(PRESETS);
        let repository = share.repository();

        let first = repository.load();
        let second = repository.load();

        assert!(first.same_entries(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn falls_back_to_cache_when_remote_unreachable() {
        let share = Share::new();
        share.seed_cache("[Cached]\nScannerAddress=10.7.7.7\n");

        let snapshot = share.repository().load();

        assert_eq!(snapshot.source(), PresetSource::Cache);
        assert_eq!(snapshot.get("Cached"), Some("10.7.7.7"));
    }

    #[test]
    fn cache_from_previous_remote_load_survives_outage() {
        let share = Share::new();
        share.publish(PRESETS);
        let repository = share.repository();
        let online = repository.load();

        fs::remove_file(share.remote()).unwrap();
        let offline = repository.load();

        assert_eq!(offline.source(), PresetSource::Cache);
        assert!(online.same_entries(&offline));
    }

    #[test]
    fn falls_back_to_cache_when_remote_is_corrupt() {
        let share = Share::new();
        share.publish("[Dup]\nScannerAddress=10.0.0.1\n[Dup]\nScannerAddress=10.0.0.2\n");
        share.seed_cache(PRESETS);

        let snapshot = share.repository().load();

        assert_eq!(snapshot.source(), PresetSource::Cache);
        assert_eq!(snapshot.len(), 3);
        assert!(share.log.contains("not a valid preset file"));
    }

    #[test]
    fn corrupt_remote_does_not_overwrite_cache() {
        let share = Share::new();
        share.publish("no sections at all\n");
        share.seed_cache(PRESETS);

        let _ = share.repository().load();

        assert_eq!(fs::read_to_string(share.cache_path()).unwrap(), PRESETS);
    }

    #[test]
    fn falls_back_to_cache_when_remote_is_not_utf8() {
        let share = Share::new();
        share.publish(b"[Caf\xe9]\nScannerAddress=10.0.0.1\n");
        share.seed_cache(PRESETS);

        let snapshot = share.repository().load();

        assert_eq!(snapshot.source(), PresetSource::Cache);
        assert!(share.log.contains("not UTF-8"));
    }

    #[test]
    fn empty_when_remote_and_cache_missing() {
        let share = Share::new();

        let snapshot = share.repository().load();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.source(), PresetSource::Empty);
        assert!(share.log.contains("no presets available"));
    }

    #[test]
    fn empty_when_cache_is_corrupt_too() {
        let share = Share::new();
        share.seed_cache("ScannerAddress=10.0.0.1\n");

        let snapshot = share.repository().load();
        assert_eq!(snapshot.source(), PresetSource::Empty);
    }

    #[test]
    fn unwritable_cache_does_not_affect_snapshot() {
        let share = Share::new();
        share.publish(PRESETS);
        let blocker = share.dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let cache = PresetCache::new(blocker.join("presets.cache.ini"), share.log.clone());
        let repository = PresetRepository::new(share.remote(), cache, share.log.clone());

        let snapshot = repository.load();

        assert_eq!(snapshot.source(), PresetSource::Remote);
        assert_eq!(snapshot.len(), 3);
        assert!(share.log.contains("Cannot update preset cache"));
    }

    #[test]
    fn invalid_entries_are_dropped_from_snapshot() {
        let share = Share::new();
        share.publish("[Old printer]\nScannerAddress=999.1.1.1\n[New printer]\nScannerAddress=10.1.2.3\n");

        let snapshot = share.repository().load();

        assert_eq!(snapshot.names().collect::<Vec<_>>(), vec!["New printer"]);
    }
}

mod reload {
    use super::*;

    #[test]
    fn starts_empty() {
        let share = Share::new();
        share.publish(PRESETS);

        assert!(share.repository().current().is_empty());
    }

    #[test]
    fn replaces_current_snapshot() {
        let share = Share::new();
        share.publish(PRESETS);
        let mut repository = share.repository();
        assert_eq!(repository.reload().len(), 3);

        share.publish("[Only]\nScannerAddress=10.0.0.99\n");
        repository.reload();

        let current = repository.current();
        assert_eq!(current.len(), 1);
        assert_eq!(current.get("Accounting"), None);
        assert_eq!(current.get("Only"), Some("10.0.0.99"));
    }

    #[test]
    fn logs_summary() {
        let share = Share::new();
        share.publish(PRESETS);
        share.repository().reload();

        assert!(share.log.contains("Loaded 3 preset(s) from network share"));
    }
}
