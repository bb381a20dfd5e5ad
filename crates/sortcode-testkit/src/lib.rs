//! Sortcode Test Kit - shared helpers for the sortcode test suites
//!
//! - Tracing configuration for test output
//! - Seeded byte-buffer fixtures
//! - Ordering and timing assertions
//!
//! # Example
//!
//! ```rust
//! use sortcode_testkit::{fixtures, init_test_tracing};
//!
//! init_test_tracing();
//! let buffers = fixtures::random_buffers(0x5eed, 16, 64);
//! assert_eq!(buffers.len(), 16);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod assertions;
pub mod fixtures;
mod tracing_config;

pub use assertions::*;
pub use tracing_config::*;
