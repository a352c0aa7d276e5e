//! Quiet-interval debouncing of source edits.
//!
//! Every edit restarts the quiet interval; the pending compile fires only
//! once input has stayed quiet for the whole interval. Blank input cancels
//! the pending compile and signals a synchronous clear instead. The
//! debouncer owns at most one pending deadline at a time, so a quiet period
//! can never emit more than one compile signal.

use std::future;
use std::time::Duration;

use log::trace;
use tokio::time::{Instant, sleep_until};

/// Immediate reaction to an edit, decided synchronously in [`Debouncer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceSignal {
    /// The edit scheduled (or rescheduled) a compile for after the quiet
    /// interval.
    Scheduled,
    /// The edit was blank: any pending compile is canceled and display
    /// state should be cleared now.
    Clear,
}

#[derive(Debug)]
struct Pending {
    source: String,
    deadline: Instant,
}

/// Debounces a stream of source snapshots into compile signals.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet interval.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Accepts a new source snapshot, superseding any pending one.
    ///
    /// Whitespace-only input returns [`DebounceSignal::Clear`] and cancels
    /// the pending compile; otherwise the compile deadline restarts from
    /// now.
    pub fn update(&mut self, source: &str) -> DebounceSignal {
        if source.trim().is_empty() {
            self.cancel();
            return DebounceSignal::Clear;
        }

        let deadline = Instant::now() + self.quiet;
        trace!(quiet_ms = self.quiet.as_millis() as u64; "Edit scheduled for compile");
        self.pending = Some(Pending {
            source: source.to_string(),
            deadline,
        });
        DebounceSignal::Scheduled
    }

    /// Cancels the pending compile, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns true if no compile is pending.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Waits for the quiet interval to elapse, then yields the pending
    /// source. Pends forever while nothing is scheduled.
    ///
    /// Cancel-safe: dropping the future leaves the pending snapshot and its
    /// deadline in place.
    pub async fn fire(&mut self) -> String {
        let deadline = match &self.pending {
            Some(pending) => pending.deadline,
            None => return future::pending().await,
        };
        sleep_until(deadline).await;
        self.pending.take().map(|p| p.source).unwrap_or_default()
    }
}
