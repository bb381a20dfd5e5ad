//! Error types for throttle construction.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while configuring a throttle.
///
/// Acquiring never fails; only construction does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThrottleError {
    /// Invalid configuration.
    #[error("invalid throttle configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for throttle construction.
pub type ThrottleResult<T> = Result<T, ThrottleError>;

/// Convert an interval in seconds into a [`Duration`].
///
/// # Errors
///
/// Returns [`ThrottleError::InvalidConfig`] for negative, non-finite or
/// overflowing values.
pub fn interval_from_secs(secs: f64) -> ThrottleResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|e| {
        ThrottleError::InvalidConfig(format!("min_interval {secs}s is not a valid duration: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_secs() {
        assert_eq!(interval_from_secs(0.1).unwrap(), Duration::from_millis(100));
        assert_eq!(interval_from_secs(2.0).unwrap(), Duration::from_secs(2));
        assert!(interval_from_secs(-0.5).is_err());
        assert!(interval_from_secs(f64::NAN).is_err());
        assert!(interval_from_secs(f64::INFINITY).is_err());
    }
}
