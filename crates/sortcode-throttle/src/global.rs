//! Process-wide token bucket fed by a background generator thread.
//!
//! Tokens are produced one at a time, `min_interval` apart, and banked up to
//! `max_unused`. Every grant consumes one token, so across all threads grants
//! never outpace the generator, and after a long pause at most `max_unused`
//! grants can happen back to back.

use std::io;
#[cfg(test)]
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error, info, trace};

use crate::Throttle;
use crate::config::ThrottleConfig;
use crate::error::{ThrottleResult, interval_from_secs};
use crate::semaphore::BoundedSemaphore;

/// Lifecycle of the token generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// No token has been requested yet.
    Uninitialized,
    /// The generator thread is producing tokens.
    Running,
}

#[derive(Debug)]
struct Shared {
    min_interval: Duration,
    tokens: BoundedSemaphore,
    generator: Mutex<GeneratorState>,
    /// Spawn attempts left to fail, for exercising the retry path.
    #[cfg(test)]
    failing_spawns: AtomicU32,
}

/// Token-bucket throttle shared by every thread holding a clone.
///
/// The generator starts on the first acquire, exactly once, and keeps running
/// while any clone of the throttle is alive.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sortcode_throttle::GlobalThrottle;
///
/// let throttle = GlobalThrottle::new(Duration::from_millis(10), 1).unwrap();
/// assert!(throttle.acquire(true));
/// ```
#[derive(Debug, Clone)]
pub struct GlobalThrottle {
    shared: Arc<Shared>,
}

impl GlobalThrottle {
    /// Create a throttle producing one token per `min_interval`, banking at most `max_unused`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ThrottleError::InvalidConfig`] if `min_interval` is zero or
    /// `max_unused` is zero.
    pub fn new(min_interval: Duration, max_unused: u32) -> ThrottleResult<Self> {
        Self::from_config(&ThrottleConfig::new(min_interval).with_max_unused(max_unused))
    }

    /// Like [`GlobalThrottle::new`] with the interval given in seconds.
    ///
    /// # Errors
    ///
    /// Also rejects negative and non-finite intervals.
    pub fn from_secs_f64(min_interval: f64, max_unused: u32) -> ThrottleResult<Self> {
        Self::new(interval_from_secs(min_interval)?, max_unused)
    }

    /// Create from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: &ThrottleConfig) -> ThrottleResult<Self> {
        config.validate()?;
        let max_unused = config.max_unused();
        debug!(
            min_interval = ?config.min_interval,
            max_unused,
            "creating global throttle"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                min_interval: config.min_interval,
                tokens: BoundedSemaphore::empty(max_unused),
                generator: Mutex::new(GeneratorState::Uninitialized),
                #[cfg(test)]
                failing_spawns: AtomicU32::new(0),
            }),
        })
    }

    /// Acquire a token.
    ///
    /// With `blocking`, waits until a token is available and returns `true`.
    /// If the generator thread cannot be spawned, a blocking call retries the
    /// spawn once per `min_interval` until it succeeds. Without `blocking`,
    /// returns whether a token was available right now, which is never the
    /// case while the generator is not running.
    pub fn acquire(&self, blocking: bool) -> bool {
        if !blocking {
            return self.ensure_generator() && self.shared.tokens.try_acquire();
        }

        while !self.ensure_generator() {
            trace!(retry_in = ?self.shared.min_interval, "generator not running");
            thread::sleep(self.shared.min_interval);
        }

        if !self.shared.tokens.try_acquire() {
            trace!("waiting for a token");
            self.shared.tokens.acquire();
        }
        true
    }

    /// Acquire a token, waiting at most `timeout`.
    ///
    /// Returns `false` at once if the generator thread cannot be spawned.
    pub fn acquire_timeout(&self, timeout: Duration) -> bool {
        if !self.ensure_generator() {
            return false;
        }
        self.shared.tokens.acquire_timeout(timeout)
    }

    /// Tokens currently banked.
    #[must_use]
    pub fn available(&self) -> u32 {
        self.shared.tokens.available()
    }

    /// Interval between generated tokens.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.shared.min_interval
    }

    /// Maximum number of banked tokens.
    #[must_use]
    pub fn max_unused(&self) -> u32 {
        self.shared.tokens.capacity()
    }

    /// Current generator state.
    #[must_use]
    pub fn generator_state(&self) -> GeneratorState {
        *self.shared.generator.lock()
    }

    /// Start the generator unless it already runs; returns whether it runs.
    ///
    /// The check and the transition happen under one lock, so concurrent
    /// first callers spawn a single thread.
    fn ensure_generator(&self) -> bool {
        let mut state = self.shared.generator.lock();
        if *state == GeneratorState::Running {
            return true;
        }

        match self.spawn_generator() {
            Ok(_) => {
                *state = GeneratorState::Running;
                info!(min_interval = ?self.shared.min_interval, "token generator started");
                true
            }
            // Stay uninitialized so the next attempt retries.
            Err(e) => {
                error!(error = %e, "failed to spawn token generator");
                false
            }
        }
    }

    fn spawn_generator(&self) -> io::Result<JoinHandle<()>> {
        #[cfg(test)]
        if self
            .shared
            .failing_spawns
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(io::Error::other("spawn refused"));
        }

        let weak = Arc::downgrade(&self.shared);
        let min_interval = self.shared.min_interval;
        thread::Builder::new()
            .name("sortcode-token-generator".into())
            .spawn(move || generate(&weak, min_interval))
    }
}

impl Throttle for GlobalThrottle {
    fn throttle(&self, blocking: bool) -> bool {
        self.acquire(blocking)
    }
}

/// Generator loop: add a token, sleep, repeat until the throttle is gone.
fn generate(shared: &Weak<Shared>, min_interval: Duration) {
    while let Some(shared) = shared.upgrade() {
        if !shared.tokens.release() {
            trace!("token bank full, token absorbed");
        }
        drop(shared);
        thread::sleep(min_interval);
    }
    debug!("global throttle dropped, token generator exiting");
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::error::ThrottleError;

    fn refusing_spawns(min_interval: Duration, failures: u32) -> GlobalThrottle {
        let throttle = GlobalThrottle::new(min_interval, 1).unwrap();
        throttle.shared.failing_spawns.store(failures, Ordering::SeqCst);
        throttle
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(GlobalThrottle::new(Duration::ZERO, 1).is_err());
        assert!(GlobalThrottle::new(Duration::from_millis(10), 0).is_err());
        assert!(matches!(
            GlobalThrottle::from_secs_f64(-0.1, 1),
            Err(ThrottleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_generator_starts_lazily() {
        let throttle = GlobalThrottle::new(Duration::from_millis(10), 1).unwrap();
        assert_eq!(throttle.generator_state(), GeneratorState::Uninitialized);
        assert_eq!(throttle.available(), 0);

        assert!(throttle.acquire(true));
        assert_eq!(throttle.generator_state(), GeneratorState::Running);
    }

    #[test]
    fn test_bank_never_exceeds_capacity() {
        let throttle = GlobalThrottle::new(Duration::from_millis(5), 3).unwrap();
        let _ = throttle.acquire(false);
        thread::sleep(Duration::from_millis(100));
        assert_eq!(throttle.available(), 3);
        assert_eq!(throttle.max_unused(), 3);

        // A full bank serves three grants without waiting on the generator.
        for _ in 0..3 {
            assert!(throttle.acquire(false));
        }
    }

    #[test]
    fn test_blocking_acquire_waits_for_next_token() {
        let throttle = GlobalThrottle::new(Duration::from_millis(50), 1).unwrap();
        assert!(throttle.acquire(true));
        let start = Instant::now();
        assert!(throttle.acquire(true));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_acquire_timeout_expires_when_starved() {
        let throttle = GlobalThrottle::new(Duration::from_secs(60), 1).unwrap();
        // The first token arrives immediately; the next one is a minute away.
        assert!(throttle.acquire(true));
        assert!(!throttle.acquire_timeout(Duration::from_millis(20)));
        assert!(!throttle.acquire(false));
    }

    #[test]
    fn test_clones_share_tokens() {
        let throttle = GlobalThrottle::new(Duration::from_secs(60), 1).unwrap();
        let clone = throttle.clone();
        assert!(throttle.acquire(true));
        assert_eq!(clone.generator_state(), GeneratorState::Running);
        assert!(!clone.acquire(false));
    }

    #[test]
    fn test_failed_spawn_denies_non_blocking_and_timeout() {
        let throttle = refusing_spawns(Duration::from_millis(10), 2);

        assert!(!throttle.acquire(false));
        assert_eq!(throttle.generator_state(), GeneratorState::Uninitialized);

        let start = Instant::now();
        assert!(!throttle.acquire_timeout(Duration::from_secs(5)));
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(throttle.generator_state(), GeneratorState::Uninitialized);

        // Spawning works again; the next caller starts the generator.
        assert!(throttle.acquire_timeout(Duration::from_secs(5)));
        assert_eq!(throttle.generator_state(), GeneratorState::Running);
    }

    #[test]
    fn test_blocking_acquire_retries_failed_spawn() {
        let throttle = refusing_spawns(Duration::from_millis(20), 3);

        let start = Instant::now();
        assert!(throttle.acquire(true));
        // Three refused spawns, each followed by one interval of backoff.
        assert!(start.elapsed() >= Duration::from_millis(60));
        assert_eq!(throttle.generator_state(), GeneratorState::Running);
    }

    #[test]
    fn test_generator_exits_after_drop() {
        let throttle = GlobalThrottle::new(Duration::from_millis(5), 1).unwrap();
        assert!(throttle.acquire(true));
        let weak = Arc::downgrade(&throttle.shared);
        drop(throttle);
        thread::sleep(Duration::from_millis(30));
        assert!(weak.upgrade().is_none());
    }
}
