//! Throttle configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ThrottleError, ThrottleResult, interval_from_secs};

/// Configuration shared by the global and local throttles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum interval between grants (global: between token refills).
    pub min_interval: Duration,

    /// Maximum number of unused tokens the global throttle may bank.
    /// Ignored by the local throttle. Defaults to 1.
    #[serde(default)]
    pub max_unused: Option<u32>,
}

impl ThrottleConfig {
    /// Create a configuration with the given interval and no banked tokens beyond one.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            max_unused: None,
        }
    }

    /// Create a configuration from an interval in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite intervals.
    pub fn from_secs_f64(min_interval: f64) -> ThrottleResult<Self> {
        Ok(Self::new(interval_from_secs(min_interval)?))
    }

    /// Set the number of tokens the global throttle may bank.
    #[must_use]
    pub const fn with_max_unused(mut self, max_unused: u32) -> Self {
        self.max_unused = Some(max_unused);
        self
    }

    /// The effective bank capacity.
    #[must_use]
    pub fn max_unused(&self) -> u32 {
        self.max_unused.unwrap_or(1)
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ThrottleError::InvalidConfig`] if the interval is zero or the
    /// capacity is below one.
    pub fn validate(&self) -> ThrottleResult<()> {
        if self.min_interval.is_zero() {
            return Err(ThrottleError::InvalidConfig(
                "min_interval must be > 0".into(),
            ));
        }
        if self.max_unused() < 1 {
            return Err(ThrottleError::InvalidConfig(
                "max_unused must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Common preset: one grant per second.
    #[must_use]
    pub const fn one_per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Common preset: ten grants per second.
    #[must_use]
    pub const fn ten_per_second() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::one_per_second()
    }
}
