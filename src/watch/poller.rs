//! Background poller configuration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_stream::StreamExt;

use super::{ModificationProbe, ModificationStream, ReloadRequest};
use crate::diagnostics::ActivityLog;

/// Creates the channel a spawned poller sends through.
///
/// Capacity is one: while a request is waiting, newer ones are dropped, so
/// any number of changes between two reloads collapses into a single reload.
#[must_use]
pub fn reload_channel() -> (mpsc::Sender<ReloadRequest>, mpsc::Receiver<ReloadRequest>) {
    mpsc::channel(1)
}

/// Polls a modification time and requests reloads when it changes.
///
/// # Example
///
/// ```no_run
/// use scan_selector::watch::{ChangePoller, FileProbe, reload_channel};
/// use std::time::Duration;
///
/// # async fn run() {
/// let (tx, mut rx) = reload_channel();
/// let handle = ChangePoller::new(FileProbe::new("presets.ini"), Duration::from_secs(30))
///     .spawn(tx);
///
/// while let Some(request) = rx.recv().await {
///     println!("reload, modified at {:?}", request.modified);
/// }
/// handle.stop();
/// # }
/// ```
pub struct ChangePoller<P> {
    probe: P,
    interval: Duration,
    auto_refresh: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    log: ActivityLog,
}

impl<P> ChangePoller<P>
where
    P: ModificationProbe + Unpin + 'static,
{
    /// Creates a poller with auto-refresh enabled.
    #[must_use]
    pub fn new(probe: P, interval: Duration) -> Self {
        Self {
            probe,
            interval,
            auto_refresh: Arc::new(AtomicBool::new(true)),
            stop: Arc::new(AtomicBool::new(false)),
            log: ActivityLog::new(),
        }
    }

    /// Sets whether polling starts enabled.
    #[must_use]
    pub fn with_auto_refresh(self, enabled: bool) -> Self {
        self.auto_refresh.store(enabled, Ordering::SeqCst);
        self
    }

    /// Reports probe failures and recoveries to `log`.
    #[must_use]
    pub fn with_log(mut self, log: ActivityLog) -> Self {
        self.log = log;
        self
    }

    /// Returns the configured polling interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns a handle controlling this poller's flags.
    #[must_use]
    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            auto_refresh: Arc::clone(&self.auto_refresh),
            stop: Arc::clone(&self.stop),
        }
    }

    /// Converts this poller into its request stream.
    ///
    /// The stream only ends after [`PollerHandle::stop`].
    #[must_use]
    pub fn into_stream(self) -> ModificationStream<P> {
        ModificationStream::new(
            self.probe,
            self.interval,
            self.auto_refresh,
            self.stop,
            self.log,
        )
    }

    /// Drives the stream on a tokio task, forwarding requests to `sender`.
    ///
    /// Requests that find the channel full are dropped. The task ends when
    /// the poller is stopped or the receiver is gone.
    pub fn spawn(self, sender: mpsc::Sender<ReloadRequest>) -> PollerHandle {
        let handle = self.handle();
        let mut stream = self.into_stream();

        tokio::spawn(async move {
            while let Some(request) = stream.next().await {
                match sender.try_send(request) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }
            }
            tracing::debug!("Change poller stopped");
        });

        handle
    }
}

/// Shared control over a running poller.
#[derive(Debug, Clone)]
pub struct PollerHandle {
    auto_refresh: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
}

impl PollerHandle {
    /// Returns `true` if the poller currently probes on each tick.
    #[must_use]
    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh.load(Ordering::SeqCst)
    }

    /// Enables or disables probing. Takes effect on the next tick.
    pub fn set_auto_refresh(&self, enabled: bool) {
        self.auto_refresh.store(enabled, Ordering::SeqCst);
    }

    /// Asks the poller to finish. It exits on its next tick.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}
