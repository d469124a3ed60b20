//! Candidate slots and chosen end times.

use serde::{Deserialize, Serialize};

use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// A bookable start time, with its end once known.
///
/// Fixed-duration slots always carry an end. Variable-duration slots carry
/// `None` until the customer picks an end from
/// [`end_times`](crate::variable::end_times).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: TimeOfDay,
    pub end: Option<TimeOfDay>,
}

impl CandidateSlot {
    pub fn open(start: TimeOfDay) -> Self {
        Self { start, end: None }
    }

    pub fn with_end(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// A compatible end time for a chosen variable-duration start.
///
/// `next_day` is set when the cursor that produced this end had passed
/// midnight; the booking window must then land on the following calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTime {
    pub time: TimeOfDay,
    pub next_day: bool,
}

impl EndTime {
    pub fn same_day(time: TimeOfDay) -> Self {
        Self {
            time,
            next_day: false,
        }
    }

    /// From an absolute cursor that may run past 1440.
    pub fn from_cursor(minutes: u32) -> Self {
        Self {
            time: TimeOfDay::wrapping(minutes),
            next_day: minutes >= MINUTES_PER_DAY,
        }
    }

    /// Minutes measured from the start day's midnight.
    pub fn absolute_minutes(&self) -> u32 {
        self.time.minutes() + if self.next_day { MINUTES_PER_DAY } else { 0 }
    }
}
