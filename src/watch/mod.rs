//! Change detection for the shared preset file.
//!
//! This module provides:
//! - The modification-time seam ([`ModificationProbe`], [`FileProbe`])
//! - A stream yielding [`ReloadRequest`]s when the file changes ([`ModificationStream`])
//! - A builder that drives the stream on a background task ([`ChangePoller`], [`PollerHandle`])
//! - Rate limiting for repeated probe failures ([`FailureThrottle`])
//!
//! The poller never touches preset state itself. It only sends requests
//! through a channel; whoever owns the state performs the reload.

mod poller;
mod probe;
mod stream;
mod throttle;

#[cfg(test)]
mod test_fixtures;

pub use poller::{ChangePoller, PollerHandle, reload_channel};
pub use probe::{FileProbe, ModificationProbe};
pub use stream::ModificationStream;
pub use throttle::{DEFAULT_FAILURE_THRESHOLD, FailureThrottle};

use std::time::SystemTime;

/// Asks the owner of the preset state to reload it.
///
/// Requests are idempotent; several pending ones mean the same as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadRequest {
    /// Modification time that triggered the request.
    pub modified: SystemTime,
}
