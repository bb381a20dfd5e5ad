//! Sortcode Throttle - rate limiting for OS threads guarding a shared resource
//!
//! - [`GlobalThrottle`] - token bucket shared by all threads, refilled by a
//!   lazily started background generator, banking at most `max_unused` tokens
//! - [`LocalThrottle`] - independent minimum interval per calling thread
//! - [`Pace`] / [`pace`] - stretch one operation to a minimum duration
//! - [`BoundedSemaphore`] - the capped counting primitive under the token bucket
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use sortcode_throttle::{GlobalThrottle, Throttle};
//!
//! // At most one call every 10ms across all threads, one token banked.
//! let throttle = GlobalThrottle::new(Duration::from_millis(10), 1).unwrap();
//!
//! let answer = throttle.throttled(|| 42);
//! assert_eq!(answer, 42);
//!
//! if throttle.throttle(false) {
//!     // got a token without waiting
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod global;
mod local;
mod pace;
mod semaphore;

pub use config::*;
pub use error::*;
pub use global::*;
pub use local::*;
pub use pace::*;
pub use semaphore::*;

/// Common trait for throttles.
pub trait Throttle: Send + Sync {
    /// Ask for permission to proceed.
    ///
    /// With `blocking`, waits as needed and returns `true`. Without, returns
    /// immediately: `true` if permitted now, `false` otherwise.
    fn throttle(&self, blocking: bool) -> bool;

    /// Wait for permission, then run `f`.
    fn throttled<T>(&self, f: impl FnOnce() -> T) -> T
    where
        Self: Sized,
    {
        self.throttle(true);
        f()
    }
}
