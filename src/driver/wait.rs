// src/driver/wait.rs
use std::{thread, time::{Duration, Instant}};

/// Bounded polling budget for one settle step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub timeout: Duration,
    pub poll: Duration,
}

impl Timing {
    pub const fn from_millis(timeout_ms: u64, poll_ms: u64) -> Self {
        Self { timeout: Duration::from_millis(timeout_ms), poll: Duration::from_millis(poll_ms) }
    }

    /// No waiting at all: the condition is checked once.
    pub const fn immediate() -> Self {
        Self { timeout: Duration::ZERO, poll: Duration::ZERO }
    }
}

/// Poll `cond` until it holds or the timeout elapses.
/// The condition is always evaluated at least once. Returns whether it held.
pub fn wait_until(timing: &Timing, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timing.timeout;
    loop {
        if cond() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        let nap = timing.poll.min(deadline - now);
        if !nap.is_zero() {
            thread::sleep(nap);
        }
    }
}
