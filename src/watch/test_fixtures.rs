//! Shared test fixtures for watch tests.

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use super::ModificationProbe;

pub fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

/// Mock probe replaying a script of observations.
///
/// `Some(secs)` reports that modification time, `None` reports a
/// `NotFound` error. The last observation repeats once the script runs out.
pub struct MockProbe {
    script: Mutex<VecDeque<Option<u64>>>,
    last: Mutex<Option<u64>>,
    calls: AtomicUsize,
}

impl MockProbe {
    pub fn new(script: Vec<Option<u64>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModificationProbe for MockProbe {
    fn modified(&self) -> io::Result<SystemTime> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }

        (*last).map(at)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "share offline"))
    }
}
