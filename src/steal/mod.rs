//! Steal rounds.
//!
//! When the team on turn misses, the other teams get a chance to answer in
//! clockwise order starting from the team after it. Each gets one attempt;
//! a wrong answer and a timeout both hand the chance to the next team.

mod queue;

pub use queue::StealQueue;
