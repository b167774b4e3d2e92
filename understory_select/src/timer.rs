// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred focus/blur work, expressed as deadlines on a host-driven clock.
//!
//! ## Usage
//!
//! 1) Record the current time with [`Timers::set_now`] whenever the host reports it.
//! 2) Schedule work with [`Timers::schedule`]; rescheduling a pending kind replaces it.
//! 3) Call [`Timers::take_due`] to pop timers whose deadline has passed, earliest first.
//! 4) Ask [`Timers::next_deadline`] when the host should wake up next.
//!
//! ## Minimal example
//!
//! ```
//! use understory_select::timer::{TimerKind, Timers};
//!
//! let mut timers = Timers::default();
//! timers.set_now(100);
//! timers.schedule(TimerKind::Focus, 10);
//! timers.schedule(TimerKind::BlurCommit, 5);
//! assert_eq!(timers.next_deadline(), Some(105));
//!
//! assert_eq!(timers.take_due(110), Some(TimerKind::BlurCommit));
//! assert_eq!(timers.take_due(110), Some(TimerKind::Focus));
//! assert_eq!(timers.take_due(110), None);
//! ```

/// Delay between losing focus and committing the blur, in milliseconds.
pub const BLUR_DELAY_MS: u64 = 10;

/// Delay before the focus notification fires, in milliseconds.
pub const FOCUS_DELAY_MS: u64 = 10;

/// The deferred operations a select can have pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Commit pending input and emit the blur notification.
    BlurCommit,
    /// Emit the focus notification.
    Focus,
}

/// At most one pending deadline per [`TimerKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    now: u64,
    blur: Option<u64>,
    focus: Option<u64>,
}

impl Timers {
    /// Last time reported by the host.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Records the host clock. Time never moves backwards.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Schedules `kind` to fire `delay_ms` from now, replacing any pending one.
    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u64) {
        *self.slot(kind) = Some(self.now.saturating_add(delay_ms));
    }

    /// Cancels `kind`. Returns `true` if it was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.slot(kind).take().is_some()
    }

    /// Cancels everything.
    pub fn cancel_all(&mut self) {
        self.blur = None;
        self.focus = None;
    }

    /// Returns `true` if `kind` is pending.
    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::BlurCommit => self.blur.is_some(),
            TimerKind::Focus => self.focus.is_some(),
        }
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.blur, self.focus) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Pops the earliest timer with a deadline at or before `now`.
    ///
    /// Ties fire the blur commit first.
    pub fn take_due(&mut self, now: u64) -> Option<TimerKind> {
        self.set_now(now);
        let kind = match (self.blur, self.focus) {
            (Some(b), Some(f)) if b <= f => TimerKind::BlurCommit,
            (Some(_), Some(_)) | (None, Some(_)) => TimerKind::Focus,
            (Some(_), None) => TimerKind::BlurCommit,
            (None, None) => return None,
        };
        let slot = self.slot(kind);
        match *slot {
            Some(deadline) if deadline <= now => {
                *slot = None;
                Some(kind)
            }
            _ => None,
        }
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<u64> {
        match kind {
            TimerKind::BlurCommit => &mut self.blur,
            TimerKind::Focus => &mut self.focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescheduling_replaces_pending_deadline() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::Focus, FOCUS_DELAY_MS);
        timers.set_now(8);
        timers.schedule(TimerKind::Focus, FOCUS_DELAY_MS);
        assert_eq!(timers.take_due(10), None);
        assert_eq!(timers.take_due(18), Some(TimerKind::Focus));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::BlurCommit, BLUR_DELAY_MS);
        assert!(timers.is_pending(TimerKind::BlurCommit));
        assert!(timers.cancel(TimerKind::BlurCommit));
        assert!(!timers.cancel(TimerKind::BlurCommit));
        assert_eq!(timers.take_due(100), None);
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn clock_is_monotonic() {
        let mut timers = Timers::default();
        timers.set_now(50);
        timers.set_now(20);
        assert_eq!(timers.now(), 50);
    }
}
