//! Frame-aligned, single-slot coalescing scheduler.
//!
//! [`UpdateScheduler`] turns a high-frequency sample stream into at most one
//! applied update per throttle interval:
//!
//! - A sample arriving at least one interval after the last applied update is
//!   applied immediately.
//! - Otherwise it is stored as the latest sample and, if no deferred update is
//!   pending, exactly one is requested for the next frame.
//! - When the deferred update fires it takes whatever sample is latest at that
//!   moment, never the one that caused the request.
//! - [`UpdateScheduler::cancel`] is synchronous: once it returns, no pending
//!   request can apply anything.
//!
//! The scheduler owns no timer. Hosts either register a callback per
//! [`FrameTicket`] and hand it back through [`UpdateScheduler::fire`], or
//! drive a shared render clock and call [`UpdateScheduler::on_frame`] on
//! every frame boundary.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use forky_layout::scheduler::{Submission, UpdateScheduler};
//!
//! let start = Instant::now();
//! let mut scheduler = UpdateScheduler::new(Duration::from_millis(16));
//! scheduler.begin(start);
//!
//! // Inside the first interval: deferred, then coalesced
//! assert!(matches!(scheduler.submit(1, start), Submission::Scheduled(_)));
//! assert!(matches!(scheduler.submit(2, start), Submission::Coalesced));
//!
//! // The frame applies the newest sample
//! assert_eq!(scheduler.on_frame(start + Duration::from_millis(16)), Some(2));
//! ```

use std::time::{Duration, Instant};

/// One display frame at 60 Hz.
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(16);

/// Identity of one deferred update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    session: u64,
    seq: u64,
}

impl FrameTicket {
    /// Session that requested this frame.
    pub fn session(&self) -> u64 {
        self.session
    }
}

/// Outcome of submitting a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// Apply this sample now.
    Apply(T),
    /// A deferred update was requested; the host must fire this ticket on
    /// the next frame.
    Scheduled(FrameTicket),
    /// A deferred update is already pending and will pick this sample up.
    Coalesced,
}

/// Single-slot coalescing scheduler. See the module docs.
#[derive(Debug, Clone)]
pub struct UpdateScheduler<T> {
    throttle: Duration,
    last_applied: Option<Instant>,
    latest: Option<T>,
    pending: Option<FrameTicket>,
    session: u64,
    seq: u64,
}

impl<T> Default for UpdateScheduler<T> {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_INTERVAL)
    }
}

impl<T> UpdateScheduler<T> {
    pub fn new(throttle: Duration) -> Self {
        Self {
            throttle,
            last_applied: None,
            latest: None,
            pending: None,
            session: 0,
            seq: 0,
        }
    }

    /// Minimum spacing between two directly applied updates.
    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    /// Start a new session at `now`.
    ///
    /// Cancels anything left from the previous session and anchors the
    /// throttle window at `now`, so a burst that begins with the session
    /// collapses into a single frame-deferred update.
    pub fn begin(&mut self, now: Instant) -> u64 {
        self.cancel();
        self.session += 1;
        self.last_applied = Some(now);
        self.session
    }

    /// Current session identifier.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Offer a sample taken at `now`.
    pub fn submit(&mut self, sample: T, now: Instant) -> Submission<T> {
        let due = match self.last_applied {
            Some(at) => now.saturating_duration_since(at) >= self.throttle,
            None => true,
        };

        if due {
            self.last_applied = Some(now);
            // Anything older than this sample is obsolete.
            self.latest = None;
            return Submission::Apply(sample);
        }

        self.latest = Some(sample);
        if self.pending.is_some() {
            return Submission::Coalesced;
        }

        self.seq += 1;
        let ticket = FrameTicket {
            session: self.session,
            seq: self.seq,
        };
        self.pending = Some(ticket);
        Submission::Scheduled(ticket)
    }

    /// Fire the deferred update identified by `ticket`.
    ///
    /// Returns the sample to apply, or `None` when the ticket was cancelled,
    /// belongs to another session, or nothing newer arrived since the last
    /// applied update.
    pub fn fire(&mut self, ticket: FrameTicket, now: Instant) -> Option<T> {
        if self.pending != Some(ticket) {
            return None;
        }
        self.pending = None;
        let sample = self.latest.take()?;
        self.last_applied = Some(now);
        Some(sample)
    }

    /// Frame boundary for hosts with a shared render clock.
    pub fn on_frame(&mut self, now: Instant) -> Option<T> {
        let ticket = self.pending?;
        self.fire(ticket, now)
    }

    /// Drop the pending request and the stored sample. Idempotent.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.latest = None;
    }

    /// True while a deferred update is waiting for its frame.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn started() -> (UpdateScheduler<u32>, Instant) {
        let t0 = Instant::now();
        let mut scheduler = UpdateScheduler::new(DEFAULT_THROTTLE_INTERVAL);
        scheduler.begin(t0);
        (scheduler, t0)
    }

    #[test]
    fn test_first_sample_without_session_applies_immediately() {
        let mut scheduler = UpdateScheduler::new(DEFAULT_THROTTLE_INTERVAL);
        assert_eq!(scheduler.submit(7, Instant::now()), Submission::Apply(7));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_burst_collapses_to_latest_sample() {
        let (mut scheduler, t0) = started();

        let mut scheduled = 0;
        for i in 0..100u32 {
            let at = t0 + Duration::from_micros(u64::from(i) * 150);
            match scheduler.submit(i, at) {
                Submission::Scheduled(_) => scheduled += 1,
                Submission::Coalesced => {}
                Submission::Apply(_) => panic!("sample {i} applied inside the interval"),
            }
        }
        assert_eq!(scheduled, 1);
        assert!(scheduler.is_pending());

        assert_eq!(scheduler.on_frame(t0 + ms(16)), Some(99));
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.on_frame(t0 + ms(32)), None);
    }

    #[test]
    fn test_sample_after_interval_applies_immediately() {
        let (mut scheduler, t0) = started();
        assert_eq!(scheduler.submit(1, t0 + ms(16)), Submission::Apply(1));
        let deferred = scheduler.submit(2, t0 + ms(20));
        assert!(matches!(deferred, Submission::Scheduled(_)));
        assert_eq!(scheduler.submit(3, t0 + ms(32)), Submission::Apply(3));
    }

    #[test]
    fn test_immediate_apply_consumes_pending_sample() {
        let (mut scheduler, t0) = started();
        let deferred = scheduler.submit(1, t0 + ms(5));
        assert!(matches!(deferred, Submission::Scheduled(_)));
        assert_eq!(scheduler.submit(2, t0 + ms(17)), Submission::Apply(2));

        // The frame still fires but has nothing newer to apply
        assert_eq!(scheduler.on_frame(t0 + ms(18)), None);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_fire_reads_sample_at_fire_time() {
        let (mut scheduler, t0) = started();
        let Submission::Scheduled(ticket) = scheduler.submit(1, t0 + ms(1)) else {
            panic!("expected a scheduled frame");
        };
        scheduler.submit(2, t0 + ms(2));
        scheduler.submit(3, t0 + ms(3));
        assert_eq!(scheduler.fire(ticket, t0 + ms(16)), Some(3));
    }

    #[test]
    fn test_cancel_before_fire() {
        let (mut scheduler, t0) = started();
        let Submission::Scheduled(ticket) = scheduler.submit(1, t0 + ms(1)) else {
            panic!("expected a scheduled frame");
        };
        scheduler.cancel();
        scheduler.cancel();

        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.fire(ticket, t0 + ms(16)), None);
        assert_eq!(scheduler.on_frame(t0 + ms(16)), None);
    }

    #[test]
    fn test_ticket_from_previous_session_is_inert() {
        let (mut scheduler, t0) = started();
        let Submission::Scheduled(old) = scheduler.submit(1, t0 + ms(1)) else {
            panic!("expected a scheduled frame");
        };

        scheduler.begin(t0 + ms(2));
        let Submission::Scheduled(new) = scheduler.submit(2, t0 + ms(3)) else {
            panic!("expected a scheduled frame");
        };
        assert_ne!(old.session(), new.session());

        assert_eq!(scheduler.fire(old, t0 + ms(16)), None);
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.fire(new, t0 + ms(18)), Some(2));
    }

    #[test]
    fn test_ticket_cancelled_then_rescheduled_is_inert() {
        let (mut scheduler, t0) = started();
        let Submission::Scheduled(first) = scheduler.submit(1, t0 + ms(1)) else {
            panic!("expected a scheduled frame");
        };
        scheduler.cancel();
        let Submission::Scheduled(second) = scheduler.submit(2, t0 + ms(2)) else {
            panic!("expected a scheduled frame");
        };

        assert_eq!(scheduler.fire(first, t0 + ms(16)), None);
        assert_eq!(scheduler.fire(second, t0 + ms(16)), Some(2));
    }
}
