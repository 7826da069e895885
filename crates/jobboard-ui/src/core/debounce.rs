//! Clock-driven debounce used by filter toolbars.
//!
//! # Design
//! - Time is passed in explicitly so the coalescing rules run off the browser.
//! - Each push restarts the quiet period and replaces the pending value.

/// Coalesces rapid updates until input pauses for `quiet_ms`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debounce<T> {
    quiet_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debounce<T> {
    /// Debouncer with the given quiet period.
    #[must_use]
    pub const fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    /// Record a new value at `now_ms`, restarting the quiet period.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms.saturating_add(self.quiet_ms)));
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((_, due)) if *due <= now_ms => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting for its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Milliseconds until the pending value settles.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, due)| due.saturating_sub(now_ms))
    }
}
