//! Relative time spans for `expiresIn`, `notBefore` and `maxAge`
//!
//! A span is either a whole number of seconds or a human readable string
//! such as `"2h"`, `"1 day"`, `"-1s"` or `"1.5h"`. A string with no unit is
//! a count of milliseconds.

use crate::error::{JwtError, JwtResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, str::FromStr};

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

const MAX_INPUT_LEN: usize = 100;

static TIMESPAN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(-?(?:\d+)?\.?\d+) *(milliseconds?|msecs?|ms|seconds?|secs?|s|minutes?|mins?|m|hours?|hrs?|h|days?|d|weeks?|w|years?|yrs?|y)?$",
    )
});

/// A signed duration with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timespan {
    millis: i64,
}

impl Timespan {
    /// Span of whole seconds.
    #[must_use]
    pub const fn seconds(secs: i64) -> Self {
        Self {
            millis: secs.saturating_mul(1_000),
        }
    }

    /// Span of milliseconds.
    #[must_use]
    pub const fn millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Length in milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Length in whole seconds, rounded toward negative infinity.
    #[must_use]
    pub const fn as_seconds(&self) -> i64 {
        self.millis.div_euclid(1_000)
    }

    /// Unix timestamp `timestamp + self`, floored to whole seconds.
    #[must_use]
    pub const fn after(&self, timestamp: i64) -> i64 {
        timestamp.saturating_add(self.as_seconds())
    }

    /// Parse a human readable span.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidOptions`] when the text is not a number
    /// optionally followed by a known unit.
    pub fn parse(text: &str) -> JwtResult<Self> {
        let invalid = || {
            JwtError::invalid_options(
                "timespan must be a number of seconds or a string such as \"2h\" or \"7 days\"",
            )
        };

        if text.is_empty() || text.len() > MAX_INPUT_LEN {
            return Err(invalid());
        }

        let pattern = TIMESPAN.as_ref().map_err(|_| invalid())?;
        let captures = pattern.captures(text).ok_or_else(invalid)?;
        let value: f64 = captures
            .get(1)
            .map(|m| m.as_str())
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;

        let unit = captures
            .get(2)
            .map_or_else(|| "ms".to_string(), |m| m.as_str().to_ascii_lowercase());
        let scale = match unit.as_str() {
            "years" | "year" | "yrs" | "yr" | "y" => YEAR,
            "weeks" | "week" | "w" => WEEK,
            "days" | "day" | "d" => DAY,
            "hours" | "hour" | "hrs" | "hr" | "h" => HOUR,
            "minutes" | "minute" | "mins" | "min" | "m" => MINUTE,
            "seconds" | "second" | "secs" | "sec" | "s" => SECOND,
            _ => 1.0,
        };

        // Flooring here keeps `as_seconds` equal to floor(span in seconds).
        let millis = (value * scale).floor();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return Err(invalid());
        }

        // Range checked above; the cast cannot truncate.
        Ok(Self::millis(millis as i64))
    }
}

impl FromStr for Timespan {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for Timespan {
    fn from(secs: i64) -> Self {
        Self::seconds(secs)
    }
}

impl From<i32> for Timespan {
    fn from(secs: i32) -> Self {
        Self::seconds(i64::from(secs))
    }
}

impl From<u32> for Timespan {
    fn from(secs: u32) -> Self {
        Self::seconds(i64::from(secs))
    }
}

impl From<std::time::Duration> for Timespan {
    fn from(duration: std::time::Duration) -> Self {
        Self::millis(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
    }
}

impl From<chrono::Duration> for Timespan {
    fn from(duration: chrono::Duration) -> Self {
        Self::millis(duration.num_milliseconds())
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis % 1_000 == 0 {
            write!(f, "{}s", self.millis / 1_000)
        } else {
            write!(f, "{}ms", self.millis)
        }
    }
}
