//! Minute-of-day arithmetic.
//!
//! All slot computation happens in minute-space (`0..1440`) so that no
//! timezone or DST rule can interfere. Conversion to absolute instants
//! happens only at the very end, in [`crate::window`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SchedulerError};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A wall-clock time expressed as minutes since local midnight.
///
/// Invariant: the inner value is always in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// 00:00.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Parse an `"HH:mm"` string.
    ///
    /// Exactly two colon-separated, all-digit fields are accepted, with hours
    /// in `0..=23` and minutes in `0..=59`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Format`] for an empty string, a missing colon,
    /// extra fields, non-digit characters, or out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk_scheduler::TimeOfDay;
    ///
    /// let t = TimeOfDay::parse("14:30").unwrap();
    /// assert_eq!(t.minutes(), 870);
    /// assert_eq!(t.to_string(), "14:30");
    /// assert!(TimeOfDay::parse("24:00").is_err());
    /// ```
    pub fn parse(hhmm: &str) -> Result<TimeOfDay> {
        let mut fields = hhmm.split(':');
        let (hours, minutes) = match (fields.next(), fields.next(), fields.next()) {
            (Some(h), Some(m), None) => (h, m),
            _ => {
                return Err(SchedulerError::Format(format!(
                    "expected HH:mm, got '{hhmm}'"
                )))
            }
        };

        let hours = parse_field(hours, hhmm)?;
        let minutes = parse_field(minutes, hhmm)?;

        if hours > 23 {
            return Err(SchedulerError::Format(format!(
                "hour {hours} out of range in '{hhmm}'"
            )));
        }
        if minutes > 59 {
            return Err(SchedulerError::Format(format!(
                "minute {minutes} out of range in '{hhmm}'"
            )));
        }

        Ok(TimeOfDay((hours * 60 + minutes) as u16))
    }

    /// Build from a minute count, rejecting anything outside the day.
    pub fn from_minutes(minutes: u32) -> Result<TimeOfDay> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SchedulerError::Format(format!(
                "minute-of-day {minutes} out of range"
            )));
        }
        Ok(TimeOfDay(minutes as u16))
    }

    /// Fold any minute count into the day (1500 becomes 01:00).
    pub fn wrapping(minutes: u32) -> TimeOfDay {
        TimeOfDay((minutes % MINUTES_PER_DAY) as u16)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0) / 60
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0) % 60
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    /// Zero-padded `"HH:mm"`.
    pub fn format(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // hour <= 23 and minute <= 59 by construction
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

fn parse_field(field: &str, whole: &str) -> Result<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchedulerError::Format(format!(
            "non-numeric field '{field}' in '{whole}'"
        )));
    }
    // At most two digits per field.
    if field.len() > 2 {
        return Err(SchedulerError::Format(format!(
            "field '{field}' too long in '{whole}'"
        )));
    }
    field
        .parse()
        .map_err(|_| SchedulerError::Format(format!("invalid number in '{whole}'")))
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}
