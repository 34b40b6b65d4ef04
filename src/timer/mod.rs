//! Countdown timers.
//!
//! The machine never waits on a clock itself. It asks a [`TimerService`] to
//! schedule a countdown and gets back a [`TimerHandle`]; when the countdown
//! runs out, the adapter driving the session feeds
//! `Command::TimerExpired(handle)` back in.
//!
//! There is at most one pending timer. Scheduling a new one cancels the
//! previous one, so an expiry for an old handle is always stale.
//!
//! Two implementations are provided:
//!
//! - [`CountdownTimer`]: a manual clock advanced explicitly. Deterministic,
//!   used by tests and by adapters that own their own tick source.
//! - [`WallClockTimer`]: deadlines against `Instant::now()`, polled.

mod countdown;
mod wall;

pub use countdown::CountdownTimer;
pub use wall::WallClockTimer;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifies one scheduled countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl TimerHandle {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Single-slot countdown capability.
pub trait TimerService {
    /// Start a countdown of `duration`, cancelling any pending one.
    fn schedule(&mut self, duration: Duration) -> TimerHandle;

    /// Cancel `handle` if it is still pending. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Time left on `handle`, or `None` if it is not pending.
    fn remaining(&self, handle: TimerHandle) -> Option<Duration>;
}

/// Format a countdown as `m:ss`, rounding partial seconds up.
///
/// ```
/// use std::time::Duration;
/// use trivia_board::timer::format_countdown;
///
/// assert_eq!(format_countdown(Duration::from_secs(45)), "0:45");
/// assert_eq!(format_countdown(Duration::from_secs(75)), "1:15");
/// assert_eq!(format_countdown(Duration::from_millis(4100)), "0:05");
/// ```
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}
