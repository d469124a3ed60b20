//! Open availability intervals for a single calendar day.
//!
//! A range whose end is at or before its start wraps past midnight: the free
//! interval is `[start, 1440) ∪ [0, end)`, continuing into the next day.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// An interval during which the provider is free on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl AvailabilityRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Parse both bounds from `"HH:mm"` strings.
    ///
    /// ```
    /// use walk_scheduler::AvailabilityRange;
    ///
    /// let r = AvailabilityRange::parse("22:00", "02:00").unwrap();
    /// assert!(r.wraps_midnight());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: TimeOfDay::parse(start)?,
            end: TimeOfDay::parse(end)?,
        })
    }

    /// `end <= start`: the interval runs into the following day.
    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the range covers minute `m` of its own day (`m < 1440`).
    ///
    /// The end bound is exclusive: a start time equal to `end` has no room left.
    pub fn contains(&self, m: u32) -> bool {
        let (start, end) = (self.start.minutes(), self.end.minutes());
        if self.wraps_midnight() {
            m >= start || m < end
        } else {
            m >= start && m < end
        }
    }

    /// Total free minutes, counting the next-day part of a wrapping range.
    pub fn length_minutes(&self) -> u32 {
        let (start, end) = (self.start.minutes(), self.end.minutes());
        if self.wraps_midnight() {
            MINUTES_PER_DAY - start + end
        } else {
            end - start
        }
    }
}

/// A range exactly as the availability API sends it, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAvailabilityRange {
    pub start: String,
    pub end: String,
}

impl RawAvailabilityRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn parse(&self) -> Result<AvailabilityRange> {
        AvailabilityRange::parse(&self.start, &self.end)
    }
}

/// Parse a batch of wire ranges, skipping any that are malformed.
///
/// A bad range must not sink the whole response, so each failure is logged and
/// dropped while the remaining ranges are kept in their original order.
pub fn parse_ranges(raw: &[RawAvailabilityRange]) -> Vec<AvailabilityRange> {
    raw.iter()
        .filter_map(|r| match r.parse() {
            Ok(range) => Some(range),
            Err(err) => {
                tracing::warn!(
                    start = %r.start,
                    end = %r.end,
                    error = %err,
                    "skipping malformed availability range"
                );
                None
            }
        })
        .collect()
}
