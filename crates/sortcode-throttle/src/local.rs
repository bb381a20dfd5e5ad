//! Per-thread minimum-interval throttle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::Throttle;
use crate::config::ThrottleConfig;
use crate::error::{ThrottleResult, interval_from_secs};

static NEXT_THROTTLE_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    /// Last grant of the current thread, per throttle id. Freed when the thread exits.
    static LAST_GRANTS: RefCell<HashMap<u64, GrantRecord>> = RefCell::new(HashMap::new());
}

/// One thread's last grant for one throttle.
///
/// Counted in the owning throttle's `live` total for as long as it exists.
#[derive(Debug)]
struct GrantRecord {
    at: Instant,
    live: Arc<AtomicUsize>,
}

impl GrantRecord {
    fn new(at: Instant, live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::Relaxed);
        Self {
            at,
            live: Arc::clone(live),
        }
    }
}

impl Drop for GrantRecord {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Spaces grants at least `min_interval` apart within each thread.
///
/// Threads never limit each other: the last-grant time lives in the calling
/// thread's own storage, is never read by another thread, and is released
/// when that thread exits.
#[derive(Debug)]
pub struct LocalThrottle {
    id: u64,
    min_interval: Duration,
    live: Arc<AtomicUsize>,
}

impl LocalThrottle {
    /// Create a throttle enforcing `min_interval` between grants per thread.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ThrottleError::InvalidConfig`] if `min_interval` is zero.
    pub fn new(min_interval: Duration) -> ThrottleResult<Self> {
        Self::from_config(&ThrottleConfig::new(min_interval))
    }

    /// Like [`LocalThrottle::new`] with the interval given in seconds.
    ///
    /// # Errors
    ///
    /// Also rejects negative and non-finite intervals.
    pub fn from_secs_f64(min_interval: f64) -> ThrottleResult<Self> {
        Self::new(interval_from_secs(min_interval)?)
    }

    /// Create from configuration; `max_unused` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: &ThrottleConfig) -> ThrottleResult<Self> {
        config.validate()?;
        let id = NEXT_THROTTLE_ID.fetch_add(1, Ordering::Relaxed);
        debug!(id, min_interval = ?config.min_interval, "creating local throttle");
        Ok(Self {
            id,
            min_interval: config.min_interval,
            live: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Grant the calling thread, if its previous grant is old enough.
    ///
    /// The first call in a thread is always granted. Later calls within
    /// `min_interval` of the previous grant either sleep off the remainder
    /// (`blocking`) or return `false` without recording anything.
    pub fn throttle(&self, blocking: bool) -> bool {
        if let Some(last) = self.last_grant() {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                if !blocking {
                    return false;
                }
                let remainder = self.min_interval - elapsed;
                trace!(?remainder, "throttling current thread");
                thread::sleep(remainder);
            }
        }

        let now = Instant::now();
        LAST_GRANTS.with_borrow_mut(|grants| {
            grants
                .entry(self.id)
                .and_modify(|record| record.at = now)
                .or_insert_with(|| GrantRecord::new(now, &self.live));
        });
        true
    }

    /// When the calling thread was last granted, if ever.
    #[must_use]
    pub fn last_grant(&self) -> Option<Instant> {
        LAST_GRANTS.with_borrow(|grants| grants.get(&self.id).map(|record| record.at))
    }

    /// Forget the calling thread's last grant, so its next call passes immediately.
    pub fn reset_current(&self) {
        LAST_GRANTS.with_borrow_mut(|grants| grants.remove(&self.id));
    }

    /// Number of threads currently holding a last-grant record.
    ///
    /// Records of exited threads are not counted.
    #[must_use]
    pub fn active_threads(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Minimum interval between grants within a thread.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

impl Drop for LocalThrottle {
    fn drop(&mut self) {
        // Other threads drop their records for this id when they exit.
        let _ = LAST_GRANTS.try_with(|grants| {
            if let Ok(mut grants) = grants.try_borrow_mut() {
                grants.remove(&self.id);
            }
        });
    }
}

impl Throttle for LocalThrottle {
    fn throttle(&self, blocking: bool) -> bool {
        Self::throttle(self, blocking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_is_granted() {
        let throttle = LocalThrottle::new(Duration::from_secs(60)).unwrap();
        assert!(throttle.last_grant().is_none());
        assert!(throttle.throttle(false));
        assert!(throttle.last_grant().is_some());
    }

    #[test]
    fn test_non_blocking_denial_keeps_last_grant() {
        let throttle = LocalThrottle::new(Duration::from_secs(60)).unwrap();
        assert!(throttle.throttle(false));
        let granted_at = throttle.last_grant();

        assert!(!throttle.throttle(false));
        assert_eq!(throttle.last_grant(), granted_at);
    }

    #[test]
    fn test_blocking_sleeps_off_remainder() {
        let throttle = LocalThrottle::new(Duration::from_millis(50)).unwrap();
        assert!(throttle.throttle(true));
        let first = throttle.last_grant().unwrap();
        assert!(throttle.throttle(true));
        let second = throttle.last_grant().unwrap();
        assert!(second.duration_since(first) >= Duration::from_millis(50));
    }

    #[test]
    fn test_grant_after_interval_passes() {
        let throttle = LocalThrottle::new(Duration::from_millis(20)).unwrap();
        assert!(throttle.throttle(false));
        thread::sleep(Duration::from_millis(25));
        assert!(throttle.throttle(false));
    }

    #[test]
    fn test_reset_current() {
        let throttle = LocalThrottle::new(Duration::from_secs(60)).unwrap();
        assert!(throttle.throttle(false));
        throttle.reset_current();
        assert!(throttle.throttle(false));
    }

    #[test]
    fn test_state_is_per_thread() {
        let throttle = LocalThrottle::new(Duration::from_secs(60)).unwrap();
        assert!(throttle.throttle(false));

        thread::scope(|s| {
            s.spawn(|| {
                assert!(throttle.last_grant().is_none());
                assert!(throttle.throttle(false));
                assert!(!throttle.throttle(false));
            });
        });

        assert!(!throttle.throttle(false));
    }

    #[test]
    fn test_exited_threads_release_their_records() {
        let throttle = LocalThrottle::new(Duration::from_secs(60)).unwrap();

        thread::scope(|s| {
            for _ in 0..2000 {
                // Joining waits for the thread's storage to be torn down.
                s.spawn(|| assert!(throttle.throttle(true))).join().unwrap();
            }
        });
        assert_eq!(throttle.active_threads(), 0);

        assert!(throttle.throttle(false));
        assert_eq!(throttle.active_threads(), 1);
        throttle.reset_current();
        assert_eq!(throttle.active_threads(), 0);
    }

    #[test]
    fn test_throttles_do_not_share_state() {
        let a = LocalThrottle::new(Duration::from_secs(60)).unwrap();
        let b = LocalThrottle::new(Duration::from_secs(60)).unwrap();
        assert!(a.throttle(false));
        assert!(b.last_grant().is_none());
        assert!(b.throttle(false));
        assert!(!a.throttle(false));
    }

    #[test]
    fn test_dropping_throttle_clears_current_thread() {
        let throttle = LocalThrottle::new(Duration::from_secs(60)).unwrap();
        assert!(throttle.throttle(false));
        let id = throttle.id;
        drop(throttle);
        assert!(LAST_GRANTS.with_borrow(|grants| !grants.contains_key(&id)));
    }

    #[test]
    fn test_rejects_bad_interval() {
        assert!(LocalThrottle::new(Duration::ZERO).is_err());
        assert!(LocalThrottle::from_secs_f64(f64::NAN).is_err());
    }
}
