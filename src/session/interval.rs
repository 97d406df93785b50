//! Inter-frame display interval.

use crate::error::{FringeError, Result};
use std::time::Duration;

/// Positive, finite time each pattern stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(Duration);

impl Interval {
    pub const DEFAULT_SECS: f64 = 2.0;
    pub const DEFAULT: Interval = Interval(Duration::from_secs(2));
    /// Longest accepted interval: one day.
    pub const MAX_SECS: f64 = 86_400.0;

    pub fn try_from_secs(secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(FringeError::InvalidTiming(format!(
                "interval must be a positive number of seconds, got {}",
                secs
            )));
        }
        if secs > Self::MAX_SECS {
            return Err(FringeError::InvalidTiming(format!(
                "interval {} exceeds the maximum of {} seconds",
                secs,
                Self::MAX_SECS
            )));
        }
        let duration = Duration::try_from_secs_f64(secs)
            .map_err(|e| FringeError::InvalidTiming(format!("{} ({})", secs, e)))?;
        if duration.is_zero() {
            return Err(FringeError::InvalidTiming(format!(
                "interval {} rounds to zero",
                secs
            )));
        }
        Ok(Self(duration))
    }

    pub fn try_parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let secs: f64 = trimmed.parse().map_err(|_| {
            FringeError::InvalidTiming(format!("'{}' is not a number", trimmed))
        })?;
        Self::try_from_secs(secs)
    }

    /// Like [`Interval::try_from_secs`], substituting [`Interval::DEFAULT`] on error.
    pub fn from_secs_lossy(secs: f64) -> Self {
        Self::try_from_secs(secs).unwrap_or_else(Self::fallback)
    }

    /// Like [`Interval::try_parse`], substituting [`Interval::DEFAULT`] on error.
    pub fn parse_lossy(input: &str) -> Self {
        Self::try_parse(input).unwrap_or_else(Self::fallback)
    }

    fn fallback(err: FringeError) -> Self {
        log::warn!(
            "{}, using default value of {:.1} seconds",
            err,
            Self::DEFAULT_SECS
        );
        Self::DEFAULT
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_intervals() {
        assert_eq!(
            Interval::try_from_secs(0.25).unwrap().as_duration(),
            Duration::from_millis(250)
        );
        assert_eq!(
            Interval::try_parse(" 1.5\n").unwrap().as_duration(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_invalid_intervals_rejected() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Interval::try_from_secs(secs),
                Err(FringeError::InvalidTiming(_))
            ));
        }
        assert!(matches!(
            Interval::try_parse("fast"),
            Err(FringeError::InvalidTiming(_))
        ));
        assert!(matches!(
            Interval::try_from_secs(1e-300),
            Err(FringeError::InvalidTiming(_))
        ));
    }

    #[test]
    fn test_interval_upper_bound() {
        assert!(Interval::try_from_secs(Interval::MAX_SECS).is_ok());
        assert!(matches!(
            Interval::try_from_secs(Interval::MAX_SECS + 1.0),
            Err(FringeError::InvalidTiming(_))
        ));
        assert!(matches!(
            Interval::try_parse("1e19"),
            Err(FringeError::InvalidTiming(_))
        ));
        assert_eq!(Interval::parse_lossy("1e19"), Interval::DEFAULT);
    }

    #[test]
    fn test_lossy_fallback_to_default() {
        assert_eq!(Interval::from_secs_lossy(-1.0), Interval::DEFAULT);
        assert_eq!(Interval::parse_lossy(""), Interval::DEFAULT);
        assert_eq!(Interval::parse_lossy("abc"), Interval::DEFAULT);
        assert_eq!(Interval::parse_lossy("3"), Interval::try_from_secs(3.0).unwrap());
        assert_eq!(Interval::DEFAULT.as_secs_f64(), Interval::DEFAULT_SECS);
    }
}
