//! Real-time countdown polled by the adapter.

use std::time::{Duration, Instant};

use super::{TimerHandle, TimerService};

/// Deadlines measured against the system monotonic clock.
///
/// Nothing fires on its own; the adapter calls [`poll`](WallClockTimer::poll)
/// between inputs and forwards any expired handle to the session.
#[derive(Debug, Default)]
pub struct WallClockTimer {
    pending: Option<(TimerHandle, Instant)>,
    next_id: u64,
}

impl WallClockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pending handle if its deadline has passed.
    pub fn poll(&mut self) -> Option<TimerHandle> {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// Deadline of the pending timer.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }
}

impl TimerService for WallClockTimer {
    fn schedule(&mut self, duration: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some((handle, Instant::now() + duration));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((h, _)) if h == handle) {
            self.pending = None;
        }
    }

    fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        match self.pending {
            Some((h, deadline)) if h == handle => {
                Some(deadline.saturating_duration_since(Instant::now()))
            }
            _ => None,
        }
    }
}
