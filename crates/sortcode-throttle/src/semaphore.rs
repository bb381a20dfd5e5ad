//! Bounded counting semaphore for OS threads.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A counting semaphore whose permit count never exceeds a fixed capacity.
///
/// Releasing at capacity is absorbed rather than treated as an error, which
/// is what a token generator wants: unused tokens simply stop accumulating.
///
/// # Invariants
/// - `0 <= permits <= capacity`
#[derive(Debug)]
pub struct BoundedSemaphore {
    permits: Mutex<u32>,
    available: Condvar,
    capacity: u32,
}

impl BoundedSemaphore {
    /// Create a semaphore with no permits available.
    #[must_use]
    pub const fn empty(capacity: u32) -> Self {
        Self::with_permits(capacity, 0)
    }

    /// Create a semaphore holding `permits` (clamped to `capacity`).
    #[must_use]
    pub const fn with_permits(capacity: u32, permits: u32) -> Self {
        let permits = if permits > capacity { capacity } else { permits };
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
            capacity,
        }
    }

    /// Add one permit unless at capacity.
    ///
    /// Returns `false` if the permit was absorbed because the semaphore was full.
    pub fn release(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits >= self.capacity {
            return false;
        }
        *permits += 1;
        drop(permits);
        self.available.notify_one();
        true
    }

    /// Take a permit if one is available, without waiting.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Take a permit, waiting as long as it takes.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Take a permit, waiting at most `timeout`.
    ///
    /// Returns `false` if no permit became available in time.
    pub fn acquire_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.acquire();
            return true;
        };

        let mut permits = self.permits.lock();
        while *permits == 0 {
            if self
                .available
                .wait_until(&mut permits, deadline)
                .timed_out()
                && *permits == 0
            {
                return false;
            }
        }
        *permits -= 1;
        true
    }

    /// Permits currently available.
    #[must_use]
    pub fn available(&self) -> u32 {
        *self.permits.lock()
    }

    /// Maximum number of permits.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }
}
