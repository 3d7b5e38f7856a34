//! Wall-clock access for log timestamps.
//!
//! The activity log stamps entries through [`Clock`] so tests can pin the
//! time.

use chrono::{DateTime, Local};

/// Abstraction over the local wall clock.
///
/// # Example
///
/// ```
/// use scan_selector::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now.timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Production clock reading the system time in the local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Frozen(DateTime<Local>);

    impl Clock for Frozen {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    #[test]
    fn clocks_are_usable_as_trait_objects() {
        let at = Local.with_ymd_and_hms(2024, 5, 2, 8, 15, 0).unwrap();
        let clocks: [Box<dyn Clock>; 2] = [Box::new(SystemClock), Box::new(Frozen(at))];

        assert!(clocks[0].now() > at);
        assert_eq!(clocks[1].now(), at);
    }
}
