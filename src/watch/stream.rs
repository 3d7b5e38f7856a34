//! Polling stream over a [`ModificationProbe`].

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::{Duration, SystemTime};

use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_stream::Stream;

use super::{FailureThrottle, ModificationProbe, ReloadRequest};
use crate::diagnostics::ActivityLog;

/// A stream of reload requests produced by polling a modification time.
///
/// The first successful or failed probe sets the baseline without emitting.
/// After that, every observed time that differs from the last one yields a
/// [`ReloadRequest`]. A failed probe leaves the last observed time unchanged,
/// so a file that was unreachable at startup triggers a request once it
/// becomes reachable.
///
/// Ticks are skipped entirely while auto-refresh is off. The stream ends on
/// the first tick after the stop flag is set.
pub struct ModificationStream<P> {
    probe: P,
    interval: Interval,
    auto_refresh: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    throttle: FailureThrottle,
    log: ActivityLog,
    /// `None` until the first probe.
    baseline: Option<Option<SystemTime>>,
}

impl<P: ModificationProbe> ModificationStream<P> {
    pub(super) fn new(
        probe: P,
        poll_interval: Duration,
        auto_refresh: Arc<AtomicBool>,
        stop: Arc<AtomicBool>,
        log: ActivityLog,
    ) -> Self {
        let mut interval = interval(poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            probe,
            interval,
            auto_refresh,
            stop,
            throttle: FailureThrottle::default(),
            log,
            baseline: None,
        }
    }

    /// Probes once and returns a request if the modification time changed.
    fn check(&mut self) -> Option<ReloadRequest> {
        let observed = match self.probe.modified() {
            Ok(modified) => {
                if self.throttle.on_success() {
                    self.log.info("Preset source is reachable again");
                }
                Some(modified)
            }
            Err(e) => {
                if self.throttle.on_failure() {
                    self.log
                        .warn(format!("Cannot check preset source for changes: {e}"));
                }
                None
            }
        };

        let Some(previous) = self.baseline else {
            self.baseline = Some(observed);
            return None;
        };

        let modified = observed?;
        if previous == Some(modified) {
            return None;
        }

        self.baseline = Some(Some(modified));
        self.log.debug("Preset source changed, requesting reload");
        Some(ReloadRequest { modified })
    }
}

impl<P> Stream for ModificationStream<P>
where
    P: ModificationProbe + Unpin,
{
    type Item = ReloadRequest;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if Pin::new(&mut self.interval).poll_tick(cx).is_pending() {
                return Poll::Pending;
            }

            if self.stop.load(Ordering::SeqCst) {
                return Poll::Ready(None);
            }

            if !self.auto_refresh.load(Ordering::SeqCst) {
                continue;
            }

            if let Some(request) = self.check() {
                return Poll::Ready(Some(request));
            }
        }
    }
}
