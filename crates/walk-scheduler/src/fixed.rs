//! Fixed-duration slot generation for walk services.
//!
//! For each range in input order, a cursor walks from `range.start` in
//! `step` increments and yields a slot whenever `cursor + duration` still
//! fits at or before `range.end`. The end bound is inclusive.
//!
//! Walks are only offered inside a single calendar day, so a range that wraps
//! past midnight (`end <= start`) yields no slots at all. Overlapping ranges
//! are not deduplicated; the availability API is expected to send disjoint
//! ranges.

use crate::error::Result;
use crate::range::AvailabilityRange;
use crate::service::validate_positive;
use crate::slot::CandidateSlot;
use crate::time::TimeOfDay;

/// Lazy iterator over fixed-duration slots.
///
/// Finite and free of side effects; clone it to restart.
#[derive(Debug, Clone)]
pub struct FixedSlots<'a> {
    ranges: &'a [AvailabilityRange],
    duration: u32,
    step: u32,
    index: usize,
    cursor: Option<u32>,
}

impl Iterator for FixedSlots<'_> {
    type Item = CandidateSlot;

    fn next(&mut self) -> Option<CandidateSlot> {
        loop {
            let range = self.ranges.get(self.index)?;

            if range.wraps_midnight() {
                self.index += 1;
                self.cursor = None;
                continue;
            }

            let cursor = self.cursor.unwrap_or(range.start.minutes());
            let end = cursor.saturating_add(self.duration);

            if end <= range.end.minutes() {
                self.cursor = Some(cursor.saturating_add(self.step));
                // end <= range.end < 1440
                return Some(CandidateSlot::with_end(
                    TimeOfDay::wrapping(cursor),
                    TimeOfDay::wrapping(end),
                ));
            }

            self.index += 1;
            self.cursor = None;
        }
    }
}

/// Lazily enumerate fixed-duration slots.
///
/// # Errors
///
/// Returns [`SchedulerError::Validation`](crate::SchedulerError::Validation)
/// when `duration_minutes` or `step_minutes` is zero.
pub fn fixed_slots(
    ranges: &[AvailabilityRange],
    duration_minutes: u32,
    step_minutes: u32,
) -> Result<FixedSlots<'_>> {
    validate_positive("duration", duration_minutes)?;
    validate_positive("step", step_minutes)?;
    Ok(FixedSlots {
        ranges,
        duration: duration_minutes,
        step: step_minutes,
        index: 0,
        cursor: None,
    })
}

/// Enumerate every fixed-duration slot across `ranges`.
///
/// # Examples
///
/// ```
/// use walk_scheduler::{generate, AvailabilityRange};
///
/// let ranges = [AvailabilityRange::parse("09:00", "10:00").unwrap()];
/// let slots = generate(&ranges, 60, 15).unwrap();
/// assert_eq!(slots.len(), 1);
/// assert_eq!(slots[0].start.to_string(), "09:00");
///
/// assert!(generate(&ranges, 61, 15).unwrap().is_empty());
/// ```
pub fn generate(
    ranges: &[AvailabilityRange],
    duration_minutes: u32,
    step_minutes: u32,
) -> Result<Vec<CandidateSlot>> {
    Ok(fixed_slots(ranges, duration_minutes, step_minutes)?.collect())
}
