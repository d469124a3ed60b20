//! Variable-duration slot generation for single-day dog sitting.
//!
//! Unlike walks, sitting supports ranges that wrap past midnight. Such a range
//! covers `[start, 1440) ∪ [0, end)` in minute-space:
//!
//! - a start in the evening segment (`s >= range.start`) is always valid, and
//!   the minimum duration may run into the next day;
//! - a start in the early-morning segment (`s < range.end`) must fit the
//!   minimum duration before `range.end`.
//!
//! Start candidates sit on a `step` grid over the whole day. End candidates
//! for a chosen start walk forward from `start + min_duration` while they stay
//! inside the range that contains the start. The walk never goes further than
//! one step past the end of the day.

use crate::error::Result;
use crate::range::AvailabilityRange;
use crate::service::validate_positive;
use crate::slot::EndTime;
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Whether `start` can begin a booking of at least `min_duration` in `range`.
fn start_fits(range: &AvailabilityRange, start: u32, min_duration: u32) -> bool {
    let (r_start, r_end) = (range.start.minutes(), range.end.minutes());
    if range.wraps_midnight() {
        start >= r_start || (start < r_end && start.saturating_add(min_duration) <= r_end)
    } else {
        start >= r_start && start.saturating_add(min_duration) <= r_end
    }
}

/// Whether an end cursor (possibly past 1440) stays inside `range` for a
/// booking that began at `start`.
fn end_fits(range: &AvailabilityRange, start: u32, cursor: u32) -> bool {
    let (r_start, r_end) = (range.start.minutes(), range.end.minutes());
    if !range.wraps_midnight() {
        return cursor <= r_end;
    }
    if start >= r_start {
        // Evening start: the rest of today is free, then up to r_end tomorrow.
        cursor < MINUTES_PER_DAY || cursor - MINUTES_PER_DAY <= r_end
    } else {
        cursor <= r_end
    }
}

/// Lazy iterator over valid sitting start times.
#[derive(Debug, Clone)]
pub struct StartTimes<'a> {
    ranges: &'a [AvailabilityRange],
    min_duration: u32,
    step: u32,
    cursor: u32,
}

impl Iterator for StartTimes<'_> {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<TimeOfDay> {
        while self.cursor < MINUTES_PER_DAY {
            let candidate = self.cursor;
            self.cursor = self.cursor.saturating_add(self.step);
            if self
                .ranges
                .iter()
                .any(|r| start_fits(r, candidate, self.min_duration))
            {
                return Some(TimeOfDay::wrapping(candidate));
            }
        }
        None
    }
}

/// Lazily enumerate valid start times on the `step_minutes` grid.
pub fn start_times_iter(
    ranges: &[AvailabilityRange],
    min_duration_minutes: u32,
    step_minutes: u32,
) -> Result<StartTimes<'_>> {
    validate_positive("minimum duration", min_duration_minutes)?;
    validate_positive("step", step_minutes)?;
    Ok(StartTimes {
        ranges,
        min_duration: min_duration_minutes,
        step: step_minutes,
        cursor: 0,
    })
}

/// Every start time on the grid from which at least `min_duration_minutes`
/// of availability follows.
///
/// # Examples
///
/// ```
/// use walk_scheduler::{start_times, AvailabilityRange};
///
/// let overnight = [AvailabilityRange::parse("22:00", "02:00").unwrap()];
/// let starts: Vec<String> = start_times(&overnight, 60, 30)
///     .unwrap()
///     .iter()
///     .map(|t| t.to_string())
///     .collect();
/// assert!(starts.contains(&"23:00".to_string()));
/// assert!(starts.contains(&"01:00".to_string()));
/// assert!(!starts.contains(&"01:30".to_string()));
/// ```
pub fn start_times(
    ranges: &[AvailabilityRange],
    min_duration_minutes: u32,
    step_minutes: u32,
) -> Result<Vec<TimeOfDay>> {
    Ok(start_times_iter(ranges, min_duration_minutes, step_minutes)?.collect())
}

/// Lazy iterator over end times compatible with a chosen start.
#[derive(Debug, Clone)]
pub struct EndTimes {
    range: Option<AvailabilityRange>,
    start: u32,
    step: u32,
    limit: u32,
    cursor: u32,
}

impl Iterator for EndTimes {
    type Item = EndTime;

    fn next(&mut self) -> Option<EndTime> {
        let range = self.range.as_ref()?;
        if self.cursor > self.limit || !end_fits(range, self.start, self.cursor) {
            self.range = None;
            return None;
        }
        let end = EndTime::from_cursor(self.cursor);
        self.cursor = self.cursor.saturating_add(self.step);
        Some(end)
    }
}

/// Lazily enumerate end times for `chosen_start`.
pub fn end_times_iter(
    ranges: &[AvailabilityRange],
    chosen_start: TimeOfDay,
    min_duration_minutes: u32,
    step_minutes: u32,
) -> Result<EndTimes> {
    validate_positive("minimum duration", min_duration_minutes)?;
    validate_positive("step", step_minutes)?;

    let start = chosen_start.minutes();
    let range = ranges.iter().find(|r| r.contains(start)).copied();
    if range.is_none() {
        tracing::debug!(start = %chosen_start, "no availability range contains chosen start");
    }

    Ok(EndTimes {
        range,
        start,
        step: step_minutes,
        limit: MINUTES_PER_DAY.saturating_add(step_minutes),
        cursor: start.saturating_add(min_duration_minutes),
    })
}

/// Every end time the customer may pick after starting at `chosen_start`.
///
/// The first range containing the start wins. An empty result means the start
/// has no compatible end and the customer must choose another start; it is
/// not an error.
pub fn end_times(
    ranges: &[AvailabilityRange],
    chosen_start: TimeOfDay,
    min_duration_minutes: u32,
    step_minutes: u32,
) -> Result<Vec<EndTime>> {
    Ok(end_times_iter(ranges, chosen_start, min_duration_minutes, step_minutes)?.collect())
}
