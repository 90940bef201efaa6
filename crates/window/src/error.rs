use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window must be higher than 0")]
    InvalidWindow,
    #[error("granularity must be higher than zero")]
    InvalidGranularity,
    #[error("window must be a multiplier of granularity")]
    IncompatibleGranularity,
    #[error("specified window must be equal or less than total window")]
    WindowTooLarge { requested: Duration, window: Duration },
}

/// Checks a window/granularity pair and returns the bucket count.
pub fn validate_dimensions(window: Duration, granularity: Duration) -> Result<usize, WindowError> {
    if window.is_zero() {
        return Err(WindowError::InvalidWindow);
    }
    if granularity.is_zero() {
        return Err(WindowError::InvalidGranularity);
    }
    let (w, g) = (window.as_nanos(), granularity.as_nanos());
    if g > w || w % g != 0 {
        return Err(WindowError::IncompatibleGranularity);
    }
    usize::try_from(w / g).map_err(|_| WindowError::IncompatibleGranularity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_window_rejected() {
        let err = validate_dimensions(Duration::ZERO, Duration::from_secs(1)).unwrap_err();
        assert_eq!(err, WindowError::InvalidWindow);
        assert_eq!(err.to_string(), "window must be higher than 0");
    }

    #[test]
    fn zero_granularity_rejected() {
        let err = validate_dimensions(Duration::from_secs(1), Duration::ZERO).unwrap_err();
        assert_eq!(err, WindowError::InvalidGranularity);
        assert_eq!(err.to_string(), "granularity must be higher than zero");
    }

    #[test]
    fn granularity_above_window_rejected() {
        let err = validate_dimensions(Duration::from_secs(1), Duration::from_secs(2)).unwrap_err();
        assert_eq!(err, WindowError::IncompatibleGranularity);
        assert_eq!(err.to_string(), "window must be a multiplier of granularity");
    }

    #[test]
    fn non_multiple_rejected() {
        let err = validate_dimensions(Duration::from_secs(10), Duration::from_secs(3)).unwrap_err();
        assert_eq!(err, WindowError::IncompatibleGranularity);
    }

    #[test]
    fn size_is_window_over_granularity() {
        let cases = [(10_000, 2_000, 5), (60_000, 1_000, 60), (1_500, 500, 3), (7, 7, 1)];
        for (w, g, size) in cases {
            let got = validate_dimensions(Duration::from_millis(w), Duration::from_millis(g));
            assert_eq!(got, Ok(size), "window {w}ms granularity {g}ms");
        }
    }

    #[test]
    fn sub_millisecond_granularity_supported() {
        let size = validate_dimensions(Duration::from_millis(1), Duration::from_micros(250)).unwrap();
        assert_eq!(size, 4);
    }
}
