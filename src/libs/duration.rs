//! Conversions between compact Jira-style durations and minutes, and
//! parsing of timestamps stored in the data file.
//!
//! ## Duration strings
//!
//! A duration is a space separated sequence of `<int><unit>` tokens, where
//! the unit is one of `d`, `h` or `m` (case-insensitive):
//!
//! - `"4h"` → 240
//! - `"2h 30m"` → 150
//! - `"1d 7h 40m"` → 940
//!
//! One working day is 8 hours, so `1d` is 480 minutes.
//!
//! Durations are always rendered back as hours and minutes (`"12h 35m"`),
//! days are never produced by [`format_duration`].
//!
//! ## Timestamps
//!
//! Timestamps are plain local date-times formatted with a configurable
//! chrono pattern, `%d %b %Y %H:%M` by default (`"14 Apr 2020 10:00"`).
//! [`TimeFormat`] bundles the date-time and date patterns and performs all
//! parsing, truncation and comparison.

use super::error::JtlError;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

pub const MINUTES_PER_HOUR: i64 = 60;
/// One working day.
pub const MINUTES_PER_DAY: i64 = 8 * MINUTES_PER_HOUR;

pub const DEFAULT_DATE_TIME_PATTERN: &str = "%d %b %Y %H:%M";
pub const DEFAULT_DATE_PATTERN: &str = "%d %b %Y";

/// Converts a duration string such as `"1d 7h 40m"` into minutes.
///
/// A token whose numeric part cannot be parsed counts as zero and is
/// reported with a warning. A token with an unknown unit fails the whole
/// conversion.
///
/// # Errors
///
/// - [`JtlError::EmptyDuration`] if the string has no tokens
/// - [`JtlError::InvalidDurationUnit`] if any token ends with something other than `d`, `h`, `m`
pub fn parse_duration(value: &str) -> Result<i64, JtlError> {
    let value = value.to_lowercase();
    let mut tokens = value.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Err(JtlError::EmptyDuration);
    }
    tokens.try_fold(0, |total, token| Ok(total + parse_token(token)?))
}

fn parse_token(token: &str) -> Result<i64, JtlError> {
    let multiplier = match token.chars().last() {
        Some('d') => MINUTES_PER_DAY,
        Some('h') => MINUTES_PER_HOUR,
        Some('m') => 1,
        _ => return Err(JtlError::InvalidDurationUnit(token.to_string())),
    };
    let number = token.trim_end_matches(['d', 'h', 'm']);
    let value = number.parse::<i64>().unwrap_or_else(|_| {
        tracing::warn!(token, "Unable to parse duration value, counting it as 0");
        0
    });
    Ok(value * multiplier)
}

/// Renders minutes as `"<H>h <M>m"`, dropping zero components.
///
/// Anything at or below zero renders as `"0m"`. Hours are not folded into
/// days.
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "0m".to_string();
    }
    let hours = minutes / MINUTES_PER_HOUR;
    let minutes = minutes % MINUTES_PER_HOUR;
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Date-time and date patterns used for the `StartedTs` column and for
/// report labels.
///
/// Both are chrono `strftime` patterns. Timestamps carry no time zone and
/// are read as local time.
///
/// # Examples
///
/// ```rust
/// use jtl::libs::duration::TimeFormat;
///
/// let format = TimeFormat::default();
/// assert_eq!(format.shift("14 Apr 2020 09:00", 150)?, "14 Apr 2020 11:30");
///
/// let day = format.truncate_to_date("14 Apr 2020 09:00")?;
/// assert_eq!(format.format_date(&day), "14 Apr 2020");
/// # Ok::<(), jtl::libs::error::JtlError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    pub date_time: String,
    pub date: String,
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            date_time: DEFAULT_DATE_TIME_PATTERN.to_string(),
            date: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}

impl TimeFormat {
    pub fn new(date_time: &str, date: &str) -> Self {
        Self {
            date_time: date_time.to_string(),
            date: date.to_string(),
        }
    }

    /// Parses a `StartedTs` value.
    ///
    /// # Errors
    ///
    /// [`JtlError::InvalidTimestamp`] naming the value and the pattern.
    pub fn parse(&self, value: &str) -> Result<NaiveDateTime, JtlError> {
        NaiveDateTime::parse_from_str(value.trim(), &self.date_time).map_err(|_| JtlError::InvalidTimestamp {
            value: value.to_string(),
            pattern: self.date_time.clone(),
        })
    }

    pub fn format(&self, value: &NaiveDateTime) -> String {
        value.format(&self.date_time).to_string()
    }

    pub fn format_date(&self, value: &NaiveDate) -> String {
        value.format(&self.date).to_string()
    }

    /// Parses a timestamp and drops its time of day.
    pub fn truncate_to_date(&self, value: &str) -> Result<NaiveDate, JtlError> {
        Ok(self.parse(value)?.date())
    }

    /// Orders two timestamps by time, not by text.
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering, JtlError> {
        Ok(self.parse(a)?.cmp(&self.parse(b)?))
    }

    /// Returns `value + minutes`, formatted back with the same pattern.
    pub fn shift(&self, value: &str, minutes: i64) -> Result<String, JtlError> {
        let shifted = self.parse(value)? + Duration::minutes(minutes);
        Ok(self.format(&shifted))
    }

    pub fn now(&self) -> String {
        self.format(&Local::now().naive_local())
    }

    pub fn today(&self) -> String {
        self.format_date(&Local::now().date_naive())
    }
}
