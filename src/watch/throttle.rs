/// Number of consecutive failures after which logging resumes.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 10;

/// Decides which probe failures are worth logging.
///
/// The first failure of a streak is logged. Later ones are suppressed until
/// the counter reaches the threshold, at which point it resets and the next
/// failure is logged again. This limits log noise only; polling continues at
/// the normal interval regardless.
#[derive(Debug, Clone)]
pub struct FailureThrottle {
    threshold: u32,
    count: u32,
    failing: bool,
}

impl Default for FailureThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_THRESHOLD)
    }
}

impl FailureThrottle {
    /// Creates a throttle resetting after `threshold` failures (minimum 1).
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold: if threshold == 0 { 1 } else { threshold },
            count: 0,
            failing: false,
        }
    }

    /// Records a failure. Returns `true` if it should be logged.
    pub const fn on_failure(&mut self) -> bool {
        self.failing = true;
        self.count += 1;
        let report = self.count == 1;
        if self.count >= self.threshold {
            self.count = 0;
        }
        report
    }

    /// Records a success. Returns `true` if it ends a failure streak.
    pub const fn on_success(&mut self) -> bool {
        let recovered = self.failing;
        self.failing = false;
        self.count = 0;
        recovered
    }

    /// Returns `true` while in a failure streak.
    #[must_use]
    pub const fn is_failing(&self) -> bool {
        self.failing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reported(throttle: &mut FailureThrottle, failures: usize) -> Vec<usize> {
        (1..=failures).filter(|_| throttle.on_failure()).collect::<Vec<_>>()
    }

    #[test]
    fn logs_first_failure_then_every_threshold() {
        let mut throttle = FailureThrottle::default();
        let mut logged = Vec::new();
        for attempt in 1..=25 {
            if throttle.on_failure() {
                logged.push(attempt);
            }
        }
        assert_eq!(logged, vec![1, 11, 21]);
    }

    #[test]
    fn success_resets_streak() {
        let mut throttle = FailureThrottle::new(3);
        assert_eq!(reported(&mut throttle, 2).len(), 1);
        assert!(throttle.is_failing());

        assert!(throttle.on_success());
        assert!(!throttle.is_failing());
        assert!(throttle.on_failure());
    }

    #[test]
    fn success_without_failures_is_not_recovery() {
        let mut throttle = FailureThrottle::default();
        assert!(!throttle.on_success());
    }

    #[test]
    fn zero_threshold_logs_every_failure() {
        let mut throttle = FailureThrottle::new(0);
        assert_eq!(reported(&mut throttle, 3).len(), 3);
    }
}
