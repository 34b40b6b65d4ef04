//! Manually advanced countdown.

use std::time::Duration;

use super::{TimerHandle, TimerService};

#[derive(Clone, Copy, Debug)]
struct Pending {
    handle: TimerHandle,
    deadline: Duration,
}

/// A countdown driven by explicit [`advance`](CountdownTimer::advance) calls.
///
/// ```
/// use std::time::Duration;
/// use trivia_board::timer::{CountdownTimer, TimerService};
///
/// let mut timer = CountdownTimer::new();
/// let handle = timer.schedule(Duration::from_secs(15));
///
/// assert_eq!(timer.advance(Duration::from_secs(10)), None);
/// assert_eq!(timer.remaining(handle), Some(Duration::from_secs(5)));
/// assert_eq!(timer.advance(Duration::from_secs(5)), Some(handle));
/// assert_eq!(timer.pending(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CountdownTimer {
    now: Duration,
    pending: Option<Pending>,
    next_id: u64,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward. Returns the handle that ran out, if any.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TimerHandle> {
        self.now += elapsed;
        match self.pending {
            Some(p) if p.deadline <= self.now => {
                self.pending = None;
                Some(p.handle)
            }
            _ => None,
        }
    }

    /// Jump straight to the pending deadline and return its handle.
    pub fn run_out(&mut self) -> Option<TimerHandle> {
        let pending = self.pending?;
        let left = pending.deadline.saturating_sub(self.now);
        self.advance(left)
    }

    /// The currently pending handle.
    #[must_use]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Time since the timer was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }
}

impl TimerService for CountdownTimer {
    fn schedule(&mut self, duration: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(Pending {
            handle,
            deadline: self.now + duration,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.pending.is_some_and(|p| p.handle == handle) {
            self.pending = None;
        }
    }

    fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.pending
            .filter(|p| p.handle == handle)
            .map(|p| p.deadline.saturating_sub(self.now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_pending() {
        let mut timer = CountdownTimer::new();
        let first = timer.schedule(Duration::from_secs(45));
        let second = timer.schedule(Duration::from_secs(15));

        assert_ne!(first, second);
        assert_eq!(timer.remaining(first), None);
        assert_eq!(timer.advance(Duration::from_secs(15)), Some(second));
        assert_eq!(timer.advance(Duration::from_secs(30)), None);
    }

    #[test]
    fn test_cancel_only_matching_handle() {
        let mut timer = CountdownTimer::new();
        let stale = timer.schedule(Duration::from_secs(1));
        let live = timer.schedule(Duration::from_secs(2));

        timer.cancel(stale);
        assert_eq!(timer.pending(), Some(live));

        timer.cancel(live);
        assert_eq!(timer.pending(), None);
        assert_eq!(timer.advance(Duration::from_secs(5)), None);
    }

    #[test]
    fn test_zero_duration_expires_on_next_advance() {
        let mut timer = CountdownTimer::new();
        let handle = timer.schedule(Duration::ZERO);
        assert_eq!(timer.advance(Duration::ZERO), Some(handle));
    }

    #[test]
    fn test_run_out() {
        let mut timer = CountdownTimer::new();
        timer.advance(Duration::from_secs(3));
        let handle = timer.schedule(Duration::from_millis(1500));

        assert_eq!(timer.run_out(), Some(handle));
        assert_eq!(timer.now(), Duration::from_millis(4500));
        assert_eq!(timer.run_out(), None);
    }
}
