//! Minimum-duration pacing for a block of work.
//!
//! Where the throttles space out *starts* of operations, a pace stretches a
//! single operation to take at least a given time, sleeping after it if it
//! finished early. A failed operation (panic or `Err`) is not stretched.

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

/// Sleep off whatever remains of `min_duration` since `started`.
fn sleep_remainder(started: Instant, min_duration: Duration) {
    let elapsed = started.elapsed();
    if let Some(remainder) = min_duration.checked_sub(elapsed) {
        if !remainder.is_zero() {
            trace!(?remainder, "pacing");
            thread::sleep(remainder);
        }
    }
}

/// Makes each paced operation last at least `min_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    min_duration: Duration,
}

impl Pace {
    /// Create a pace of at least `min_duration` per operation.
    #[must_use]
    pub const fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    /// Start timing; the returned guard sleeps on drop.
    #[must_use = "the guard paces the scope it lives in"]
    pub fn start(&self) -> PaceGuard {
        PaceGuard {
            started: Instant::now(),
            min_duration: self.min_duration,
        }
    }

    /// Run `f`, then sleep off the remainder of the pace if it succeeded.
    ///
    /// # Errors
    ///
    /// Returns `f`'s error unchanged, immediately.
    pub fn run<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let started = Instant::now();
        let result = f()?;
        sleep_remainder(started, self.min_duration);
        Ok(result)
    }

    /// The minimum duration per operation.
    #[must_use]
    pub const fn min_duration(&self) -> Duration {
        self.min_duration
    }
}

/// Scope guard created by [`pace`] or [`Pace::start`].
///
/// On drop it sleeps until `min_duration` has passed since creation, unless
/// the thread is unwinding from a panic.
#[derive(Debug)]
#[must_use = "the guard paces the scope it lives in"]
pub struct PaceGuard {
    started: Instant,
    min_duration: Duration,
}

impl PaceGuard {
    /// Time since the guard was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for PaceGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }
        sleep_remainder(self.started, self.min_duration);
    }
}

/// Pace the enclosing scope to take at least `min_duration`.
///
/// ```
/// use std::time::{Duration, Instant};
/// use sortcode_throttle::pace;
///
/// let start = Instant::now();
/// {
///     let _pace = pace(Duration::from_millis(20));
/// }
/// assert!(start.elapsed() >= Duration::from_millis(20));
/// ```
pub fn pace(min_duration: Duration) -> PaceGuard {
    Pace::new(min_duration).start()
}
